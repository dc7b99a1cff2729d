//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements                           | Connects to            |
//! |---------------|--------------------------------------|------------------------|
//! | `gpio`        | DigitalInputPort, DigitalOutputPort  | ESP32 GPIO / sim bank  |
//! | `hal_pins`    | DigitalInputPort, DigitalOutputPort  | embedded-hal pins      |
//! | `delay`       | embedded_hal::delay::DelayNs         | FreeRTOS / std sleep   |
//! | `log_sink`    | EventSink                            | Serial log output      |
//! | `task_runner` | TaskRunner                           | Pinned pthreads        |

pub mod delay;
pub mod gpio;
pub mod hal_pins;
pub mod log_sink;
pub mod task_runner;
