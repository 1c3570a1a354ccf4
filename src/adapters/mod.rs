//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements  | Connects to                       |
//! |------------|-------------|-----------------------------------|
//! | `hardware` | SensorPort  | TSL2591 over I²C                  |
//! |            | InputPort   | 74HC165 button shift register     |
//! |            | DisplaySink | SSD1306 text panel                |
//! | `log_sink` | EventSink   | Serial log output                 |
//! | `time`     | Clock       | ESP32 system timer / FreeRTOS     |

pub mod hardware;
pub mod log_sink;
pub mod time;
