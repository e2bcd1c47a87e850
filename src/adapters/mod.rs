//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                     |
//! |----------------|--------------------|---------------------------------|
//! | `hardware`     | SensorPort         | ESP32 ADC, GPIO                 |
//! |                | AlertPort          | LEDC PWM, RMT matrix, buzzer    |
//! |                | DisplayPort        | SSD1306 over I2C                |
//! | `log_sink`     | EventSink          | Serial log output               |
//! | `time`         | —                  | ESP32 system timer              |

pub mod hardware;
pub mod log_sink;
pub mod time;
