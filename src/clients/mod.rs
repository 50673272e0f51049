pub mod exchange_client;

pub use exchange_client::ExchangeClient;
