// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use reeply_app::{Message, MessageKind, Thread};
use time::{Date, Duration, Month, PrimitiveDateTime, Time};

const AREA_CODES: [&str; 12] = [
    "206", "212", "303", "404", "415", "512", "608", "617", "702", "718", "919", "971",
];

// Commercial short codes show up in real SMS exports alongside phone numbers.
const SHORT_CODES: [&str; 6] = ["22395", "32665", "48369", "55444", "87902", "96831"];

const REFERENCE_YEAR: i32 = 2025;

/// First day of the demo window. Ten months wide, so the grid is forced to
/// scroll horizontally on any normal terminal.
fn window_start() -> Date {
    Date::from_calendar_date(REFERENCE_YEAR, Month::January, 1)
        .expect("reference window start is a valid date")
}

const WINDOW_DAYS: usize = 304;

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Deterministic generator of SMS-shaped demo threads. Same seed, same
/// threads, so TUI tests can assert on exact grid contents.
#[derive(Debug, Clone)]
pub struct ThreadFaker {
    rng: DeterministicRng,
}

impl ThreadFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    /// Generates `count` threads ordered the way the server orders them:
    /// by first message ascending, then last message ascending.
    pub fn threads(&mut self, count: usize) -> Vec<Thread> {
        let mut threads: Vec<Thread> = (0..count).map(|_| self.thread()).collect();
        threads.sort_by(|a, b| {
            a.first_message
                .cmp(&b.first_message)
                .then(a.last_message.cmp(&b.last_message))
        });
        threads
    }

    fn thread(&mut self) -> Thread {
        let address = self.address();

        // Threads span anywhere from a single day to most of the window.
        let span_days = 1 + self.rng.int_n(WINDOW_DAYS * 3 / 4);
        let first_day = self.rng.int_n(WINDOW_DAYS - span_days + 1);

        let mut messages = Vec::new();
        for day_offset in 0..span_days {
            // Sparse by default, so most cells stay empty.
            if self.rng.int_n(10) < 7 {
                continue;
            }
            let day = day_at(first_day + day_offset);
            let count = self.day_volume();
            messages.extend(self.day_messages(day, count));
        }
        if messages.is_empty() {
            let day = day_at(first_day);
            messages.extend(self.day_messages(day, 1));
        }

        let first_message = messages[0].sent_at;
        let last_message = messages[messages.len() - 1].sent_at;
        Thread {
            address,
            messages,
            first_message,
            last_message,
        }
    }

    fn address(&mut self) -> String {
        if self.rng.int_n(8) == 0 {
            return SHORT_CODES[self.rng.int_n(SHORT_CODES.len())].to_owned();
        }
        let area = AREA_CODES[self.rng.int_n(AREA_CODES.len())];
        format!("+1{}555{:04}", area, self.rng.int_n(10_000))
    }

    /// Weighted toward small counts with occasional bursts, so all four dot
    /// buckets appear in demo data.
    fn day_volume(&mut self) -> usize {
        match self.rng.int_n(20) {
            0..=9 => 1,
            10..=15 => 2 + self.rng.int_n(3),
            16..=18 => 5 + self.rng.int_n(5),
            _ => 10 + self.rng.int_n(20),
        }
    }

    fn day_messages(&mut self, day: Date, count: usize) -> Vec<Message> {
        let mut minute_of_day = 8 * 60 + self.rng.int_n(60) as u16;
        (0..count)
            .map(|_| {
                let time = Time::from_hms((minute_of_day / 60) as u8, (minute_of_day % 60) as u8, 0)
                    .expect("minute of day stays within 24 hours");
                // Conversations alternate loosely rather than strictly.
                let kind = if self.rng.int_n(5) < 2 {
                    MessageKind::Sent
                } else {
                    MessageKind::Received
                };
                minute_of_day = (minute_of_day + 1 + self.rng.int_n(45) as u16).min(23 * 60 + 59);
                Message {
                    sent_at: PrimitiveDateTime::new(day, time),
                    kind,
                }
            })
            .collect()
    }
}

fn day_at(offset: usize) -> Date {
    window_start() + Duration::days(offset as i64)
}

/// Demo dataset with a fixed seed, shared by the demo runtime and tests.
pub fn demo_threads(count: usize) -> Vec<Thread> {
    ThreadFaker::new(0x52EE_9147).threads(count)
}

/// Hand-built thread for grid tests: one entry per active day as
/// `(date, sent, received)`, messages spread within each day.
pub fn thread_with_days(address: &str, days: &[(Date, usize, usize)]) -> Thread {
    let mut messages = Vec::new();
    for &(day, sent, received) in days {
        let mut minute = 9 * 60u16;
        for index in 0..sent + received {
            let kind = if index < sent {
                MessageKind::Sent
            } else {
                MessageKind::Received
            };
            let time = Time::from_hms((minute / 60) as u8, (minute % 60) as u8, 0)
                .expect("minute of day stays within 24 hours");
            messages.push(Message {
                sent_at: PrimitiveDateTime::new(day, time),
                kind,
            });
            minute += 7;
        }
    }
    messages.sort_by_key(|message| message.sent_at);
    let first_message = messages
        .first()
        .map(|message| message.sent_at)
        .unwrap_or_else(|| PrimitiveDateTime::new(window_start(), Time::MIDNIGHT));
    let last_message = messages
        .last()
        .map(|message| message.sent_at)
        .unwrap_or(first_message);
    Thread {
        address: address.to_owned(),
        messages,
        first_message,
        last_message,
    }
}
