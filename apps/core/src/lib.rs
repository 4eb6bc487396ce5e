pub mod action_executor;
pub mod config;
pub mod contract;
pub mod core_service;
pub mod index_store;
pub mod logging;
pub mod model;
pub mod pager;
pub mod remote;
pub mod runtime;
pub mod scheduler;
pub mod search;
pub mod transport;

#[cfg(test)]
mod tests {
    mod query_latency_test {
        include!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../tests/perf/query_latency_test.rs"
        ));
    }
}
