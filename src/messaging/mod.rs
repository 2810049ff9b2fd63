/// Messaging module for Event/Command architecture
///
/// This module implements the Event/Command segregation pattern:
/// - **Events**: Notifications of things that happened (past tense, broadcast)
/// - **Commands**: Requests to perform actions (imperative, targeted)
///
/// ## Architecture
///
/// ```text
/// ┌──────────┐   Command    ┌──────────┐   calls   ┌──────────────────┐
/// │ Terminal │ ───────────> │ Executor │ ────────> │ WizardController │
/// └──────────┘              └──────────┘           └──────────────────┘
///      ▲                                                    │
///      │                    ┌─────────────┐                 │ WizardEvent
///      └─────────────────── │  Event Bus  │ <───────────────┘
///          notices          └─────────────┘
/// ```

pub mod events;
pub mod commands;
pub mod bus;
pub mod executor;

// Re-export commonly used types
pub use events::WizardEvent;
pub use commands::{Command, CommandResult, USAGE};
pub use bus::{EventBus, SubscriberId};
pub use executor::CommandExecutor;
