//! Alert relay pipeline
//!
//! normalize ticker -> classify -> render -> deliver


use crate::config::DEFAULT_CHAT_ID;
use crate::error::Result;
use crate::format::{Formatter, RenderedMessage};
use crate::notify::Deliver;
use crate::signal::{classify, Rejection, Variant};
use crate::ticker::normalize;
use crate::types::AlertRecord;
use std::sync::Arc;

/// What the pure part of the pipeline decided
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Deliver(RenderedMessage),
    Filtered(Rejection),
}

/// What happened to a dispatched alert
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Sent { action: String, variant: Variant },
    Filtered(Rejection),
}

/// Every deliverable message is addressed to [`DEFAULT_CHAT_ID`]
#[derive(Clone)]
pub struct Relay {
    formatter: Formatter,
    delivery: Arc<dyn Deliver>,
}

impl Relay {
    pub fn new(formatter: Formatter, delivery: Arc<dyn Deliver>) -> Self {
        Self {
            formatter,
            delivery,
        }
    }

    /// Decide and render without delivering
    pub fn evaluate(&self, record: &AlertRecord) -> Outcome {
        let classification = classify(record);
        if let Some(rejection) = classification.rejection {
            return Outcome::Filtered(rejection);
        }

        let pair = normalize(&record.ticker());
        let text = self.formatter.render(record, &pair, &classification);

        Outcome::Deliver(RenderedMessage {
            chat_id: DEFAULT_CHAT_ID.to_string(),
            text,
            parse_mode: Formatter::parse_mode(classification.variant),
            disable_preview: true,
            variant: classification.variant,
        })
    }

    /// Evaluate and hand a deliverable message to the delivery collaborator.
    /// Delivery failures propagate; nothing is retried.
    pub async fn dispatch(&self, record: &AlertRecord) -> Result<Dispatch> {
        match self.evaluate(record) {
            Outcome::Filtered(rejection) => Ok(Dispatch::Filtered(rejection)),
            Outcome::Deliver(message) => {
                self.delivery.deliver(&message).await?;
                Ok(Dispatch::Sent {
                    action: record.action(),
                    variant: message.variant,
                })
            }
        }
    }
}
