pub mod error_state;
pub mod force_graph;
pub mod graph_tools;
pub mod instance_detail;
pub mod instance_table;
pub mod nav;
pub mod search;
pub mod sidebar;
