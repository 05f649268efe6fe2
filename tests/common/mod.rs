#![allow(dead_code)]

use chat_directory_lib::*;
use chrono::{DateTime, TimeZone, Utc};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
}

pub fn new_directory() -> Directory<ManualClock> {
    init_tracing();
    Directory::with_clock(ManualClock::new(epoch()))
}

// Registers every (name, mobile) pair and hands back the users in order.
pub fn register(directory: &mut Directory<ManualClock>, people: &[(&str, &str)]) -> Vec<User> {
    people
        .iter()
        .map(|(name, mobile)| {
            directory
                .create_user(name.to_string(), mobile.to_string())
                .expect("Failed to register user")
        })
        .collect()
}

pub fn send_text(
    directory: &mut Directory<ManualClock>,
    content: &str,
    sender: &User,
    group: &Group,
) -> MessageId {
    let message_id = directory.create_message(content.to_string());
    let message = directory
        .message(message_id)
        .expect("Created message should be retrievable")
        .clone();
    directory
        .send_message(&message, sender, group)
        .expect("Failed to send message");
    message_id
}

pub fn member_names(directory: &Directory<ManualClock>, group: &Group) -> Vec<String> {
    directory
        .members(group)
        .expect("Group should exist")
        .iter()
        .map(|user| user.name().to_string())
        .collect()
}
