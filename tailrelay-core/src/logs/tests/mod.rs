mod envelope_tests;
mod framer_tests;
mod record_tests;
mod relay_tests;
mod router_tests;
mod support;
