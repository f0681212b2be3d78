// Shared by several test binaries; each one uses a different subset.
#![allow(dead_code)]

pub mod wiremock_helpers;
