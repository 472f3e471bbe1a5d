// Adapters layer: concrete implementations for external systems (history files).

pub mod csv_history;
