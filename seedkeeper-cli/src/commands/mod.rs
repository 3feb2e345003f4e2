pub mod backfill;
pub mod update_bindings;
