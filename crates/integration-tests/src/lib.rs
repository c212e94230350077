//! End-to-end tests for the faultline server live under `tests/`
