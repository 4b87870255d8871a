//! Walk-through tests over the bundled wizards.

mod history_workflow;
mod wizard_walks;
