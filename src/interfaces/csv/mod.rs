pub mod actuals_reader;
pub mod payout_writer;
