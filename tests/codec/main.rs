//! End-to-end tests for `dvi-adpcm`

mod scenarios;
mod streaming;
