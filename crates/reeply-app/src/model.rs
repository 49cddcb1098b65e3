// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;
use time::{Date, PrimitiveDateTime};

/// Message direction as carried on the wire: 1 = received, 2 = sent.
/// The SMS backup format defines further values (drafts, failed sends);
/// those count toward volume but not toward the direction mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Received,
    Sent,
    Other,
}

impl MessageKind {
    pub const fn from_wire(value: i64) -> Self {
        match value {
            1 => Self::Received,
            2 => Self::Sent,
            _ => Self::Other,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Sent => "sent",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    pub sent_at: PrimitiveDateTime,
    pub kind: MessageKind,
}

impl Message {
    pub const fn day(self) -> Date {
        self.sent_at.date()
    }
}

/// One conversation thread: every message exchanged with a single address,
/// plus the precomputed first/last bounds the server derives for sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    pub address: String,
    pub messages: Vec<Message>,
    pub first_message: PrimitiveDateTime,
    pub last_message: PrimitiveDateTime,
}

impl Thread {
    /// Groups this thread's messages by calendar day, ascending.
    pub fn activity_by_day(&self) -> Vec<DayActivity> {
        let mut days: BTreeMap<Date, DayActivity> = BTreeMap::new();
        for message in &self.messages {
            let entry = days.entry(message.day()).or_insert(DayActivity {
                day: message.day(),
                total: 0,
                sent: 0,
                received: 0,
            });
            entry.total += 1;
            match message.kind {
                MessageKind::Sent => entry.sent += 1,
                MessageKind::Received => entry.received += 1,
                MessageKind::Other => {}
            }
        }
        days.into_values().collect()
    }
}

/// Message volume for one (thread, day) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayActivity {
    pub day: Date,
    pub total: usize,
    pub sent: usize,
    pub received: usize,
}

impl DayActivity {
    pub const fn direction(self) -> DirectionMix {
        if self.sent > self.received {
            DirectionMix::SentHeavy
        } else if self.received > self.sent {
            DirectionMix::ReceivedHeavy
        } else {
            DirectionMix::Balanced
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionMix {
    SentHeavy,
    ReceivedHeavy,
    Balanced,
}

/// Dot glyph bucket for a day's message count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotSize {
    Single,
    Few,
    Many,
    Burst,
}

impl DotSize {
    pub const fn for_count(count: usize) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(Self::Single),
            2..=4 => Some(Self::Few),
            5..=9 => Some(Self::Many),
            _ => Some(Self::Burst),
        }
    }

    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Single => "·",
            Self::Few => "•",
            Self::Many => "●",
            Self::Burst => "█",
        }
    }
}
