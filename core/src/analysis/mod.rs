mod connectivity;
mod metrics;
