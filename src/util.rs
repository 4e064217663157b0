use crate::config::DESKTOP_WIDTH_THRESHOLD;

pub fn capitalize(s: &str) -> String {
	let mut chars = s.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Thousands-separated integer, e.g. `1,234,567`.
pub fn format_count(n: u64) -> String {
	let digits = n.to_string();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, c) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(c);
	}
	out
}

/// A 0..1 ratio as a percentage with one decimal, e.g. `12.5%`.
pub fn format_percent(ratio: f64) -> String {
	format!("{:.1}%", ratio * 100.0)
}

pub fn format_decimal(x: f64) -> String {
	format!("{x:.2}")
}

/// Drops markup from instance descriptions; they are shown as plain text.
pub fn strip_html(html: &str) -> String {
	let mut out = String::with_capacity(html.len());
	let mut in_tag = false;
	for c in html.chars() {
		match c {
			'<' => in_tag = true,
			'>' if in_tag => {
				in_tag = false;
				out.push(' ');
			}
			_ if !in_tag => out.push(c),
			_ => {}
		}
	}
	out.replace("&amp;", "&")
		.replace("&lt;", "<")
		.replace("&gt;", ">")
		.replace("&quot;", "\"")
		.replace("&#39;", "'")
		.split_whitespace()
		.collect::<Vec<_>>()
		.join(" ")
}

pub fn is_small_screen() -> bool {
	web_sys::window()
		.and_then(|w| w.inner_width().ok())
		.and_then(|w| w.as_f64())
		.is_some_and(|w| w < DESKTOP_WIDTH_THRESHOLD)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn capitalizes_first_letter() {
		assert_eq!(capitalize("mastodon"), "Mastodon");
		assert_eq!(capitalize(""), "");
	}

	#[test]
	fn formats_counts_with_separators() {
		assert_eq!(format_count(0), "0");
		assert_eq!(format_count(999), "999");
		assert_eq!(format_count(1000), "1,000");
		assert_eq!(format_count(1234567), "1,234,567");
	}

	#[test]
	fn formats_percentages() {
		assert_eq!(format_percent(0.125), "12.5%");
		assert_eq!(format_percent(1.0), "100.0%");
	}

	#[test]
	fn strips_markup() {
		assert_eq!(
			strip_html("<p>Cats &amp; dogs</p><p>welcome</p>"),
			"Cats & dogs welcome"
		);
	}
}
