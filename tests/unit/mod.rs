/// Unit tests over the public library API
mod domain_tests;
mod statistics_tests;
