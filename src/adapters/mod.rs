//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter    | Implements                       | Connects to            |
//! |------------|----------------------------------|------------------------|
//! | `hardware` | TemperatureSource, ActuatorPort  | sensor, GPIO outputs   |
//! | `log_sink` | EventSink                        | serial log output      |
//! | `time`     | Clock                            | system timer           |

pub mod hardware;
pub mod log_sink;
pub mod time;
