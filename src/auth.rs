//! Admin session token, kept in browser session storage.

use log::warn;
use web_sys::Storage;

use crate::config::AUTH_TOKEN_KEY;

fn session_storage() -> Option<Storage> {
	web_sys::window()?.session_storage().ok().flatten()
}

pub fn get_auth_token() -> Option<String> {
	session_storage()?
		.get_item(AUTH_TOKEN_KEY)
		.ok()
		.flatten()
		.filter(|token| !token.is_empty())
}

pub fn set_auth_token(token: &str) {
	let stored = session_storage().map(|s| s.set_item(AUTH_TOKEN_KEY, token).is_ok());
	if stored != Some(true) {
		warn!("could not store admin token");
	}
}

pub fn unset_auth_token() {
	if let Some(storage) = session_storage() {
		let _ = storage.remove_item(AUTH_TOKEN_KEY);
	}
}

pub fn is_logged_in() -> bool {
	get_auth_token().is_some()
}
