//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements   | Connects to                      |
//! |----------------|--------------|----------------------------------|
//! | `readings`     | ReadingsPort | Battery ADC, fusion frames       |
//! | `accessory`    | EventSink    | Accessory characteristic values  |
//! | `log_sink`     | EventSink    | Serial log output                |
//! | `config_store` | ConfigPort   | Flash blob / in-memory store     |

pub mod accessory;
pub mod config_store;
pub mod log_sink;
pub mod readings;
