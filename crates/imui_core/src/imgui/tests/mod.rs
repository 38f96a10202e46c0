//! Multi-frame scenario tests for the reconciliation core

mod context_scenarios;
mod lifecycle_scenarios;
