// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the single-shot flow:
// pick a search area, fetch a token, query the airspace, print a report.
//
// Module responsibilities:
// - `config`: Gathers credentials, endpoint URLs and the region menu
//   from the environment in one place and hands them to the rest of the
//   crate, so nothing else touches `std::env`.
// - `api`: Encapsulates the two HTTP interactions with OpenSky (token
//   exchange, state-vector query) behind typed failure enums.
// - `states`: The positional wire schema of the state-vector response
//   and its decoding into named, nullable fields.
// - `report`: Pure derivation of the per-aircraft text report from a
//   decoded state vector.
// - `ui`: Implements the terminal flow (region selection, spinners,
//   rendering) and delegates requests to `api`.
//
// Keeping this separation makes it easier to test the API and report
// logic or replace the UI in the future (for example, adding JSON
// output or a TUI).
pub mod api;
pub mod config;
pub mod report;
pub mod states;
pub mod ui;
