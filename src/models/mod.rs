pub mod candle;
pub mod snapshot;
