//! Channel API for feeding topics and messages into the native host.
//!
//! A producer first advertises a [`Topic`], then publishes messages on it.
//! Topics can be withdrawn at any time; the panel keeps preferences for
//! withdrawn topics and shows them as unavailable.

use std::sync::mpsc::{channel, Receiver, SendError, Sender};

use crate::color_scheme::ColorScheme;

/// Handle of an advertised topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub name: String,
    pub schema_name: Option<String>,
}

/// Messages sent over the channel to drive the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    /// Add a topic to the catalog (or update its schema name).
    AdvertiseTopic {
        name: String,
        schema_name: Option<String>,
    },
    /// Remove a topic from the catalog.
    RemoveTopic { name: String },
    /// `count` messages arrived on `topic`.
    Messages { topic: String, count: usize },
    /// Switch the panel's color scheme.
    SetColorScheme(ColorScheme),
}

/// Convenience sender for feeding the host.
#[derive(Clone)]
pub struct TopicSink {
    tx: Sender<HostCommand>,
}

impl TopicSink {
    /// Advertise a topic and return its handle.
    pub fn advertise<S: Into<String>>(
        &self,
        name: S,
        schema_name: Option<S>,
    ) -> Result<Topic, SendError<HostCommand>> {
        let topic = Topic {
            name: name.into(),
            schema_name: schema_name.map(Into::into),
        };
        self.tx.send(HostCommand::AdvertiseTopic {
            name: topic.name.clone(),
            schema_name: topic.schema_name.clone(),
        })?;
        Ok(topic)
    }

    /// Withdraw a previously advertised topic.
    pub fn remove(&self, topic: &Topic) -> Result<(), SendError<HostCommand>> {
        self.tx.send(HostCommand::RemoveTopic {
            name: topic.name.clone(),
        })
    }

    /// Publish a single message on `topic`.
    pub fn publish(&self, topic: &Topic) -> Result<(), SendError<HostCommand>> {
        self.publish_many(topic, 1)
    }

    /// Publish `count` messages on `topic` at once.
    pub fn publish_many(&self, topic: &Topic, count: usize) -> Result<(), SendError<HostCommand>> {
        self.tx.send(HostCommand::Messages {
            topic: topic.name.clone(),
            count,
        })
    }

    pub fn set_color_scheme(&self, scheme: ColorScheme) -> Result<(), SendError<HostCommand>> {
        self.tx.send(HostCommand::SetColorScheme(scheme))
    }
}

/// Create a new channel pair for the native host.
pub fn channel_topics() -> (TopicSink, Receiver<HostCommand>) {
    let (tx, rx) = channel();
    (TopicSink { tx }, rx)
}
