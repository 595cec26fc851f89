use crate::error::Error;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;

/// One telemetry submission.
#[derive(Serialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct Message {
    pub id: i64,
    pub key: String,
    pub info: i64,
}

/// Inbound decoding record for a [`Message`].
///
/// A client supplied `id` of any JSON type is accepted and dropped; the bound message always
/// has `id == 0`.
#[derive(Deserialize, Debug, Default)]
pub(super) struct MessageRequest {
    #[serde(rename = "id", default)]
    pub discarded_id: Option<IgnoredAny>,
    #[serde(default, with = "double_option")]
    pub key: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub info: Option<Option<i64>>,
}

impl MessageRequest {
    /// Decode and validate a raw request body into a [`Message`].
    ///
    /// At least one message field (`key` or `info`) must be present, even as `null`; absent
    /// or `null` fields take their zero value. Only the first JSON value of the body is read,
    /// anything after it is ignored.
    pub fn bind(body: &[u8]) -> Result<Message, Error> {
        let mut de = serde_json::Deserializer::from_slice(body);
        let req = Self::deserialize(&mut de).map_err(Error::InvalidBody)?;
        req.into_message()
    }

    fn into_message(self) -> Result<Message, Error> {
        if self.discarded_id.is_some() {
            tracing::debug!("discarding client supplied message id");
        }
        if self.key.is_none() && self.info.is_none() {
            return Err(Error::MissingMessage);
        }
        Ok(Message {
            id: 0,
            key: self.key.flatten().unwrap_or_default(),
            info: self.info.flatten().unwrap_or_default(),
        })
    }
}

/// Outbound acknowledgement of an accepted [`Message`].
#[derive(Serialize, Debug, Clone, Default, Eq, PartialEq)]
pub(super) struct MessageResponse {
    #[serde(flatten)]
    pub message: Message,
    pub counter: u64,
    pub device_id: i64,
}

impl MessageResponse {
    pub fn new(message: Message, counter: u64, device_id: Option<i64>) -> Self {
        Self {
            message,
            counter,
            device_id: device_id.unwrap_or_default(),
        }
    }
}
