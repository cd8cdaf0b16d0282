//! Synthetic WhatsApp chat generator for stress testing chatstat.
//!
//! Usage: cargo run --features gen-test --bin gen_chat -- [messages] [output]
//! Example: cargo run --features gen-test --bin gen_chat -- 100000 heavy_chat.txt

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use rand::Rng;
use rand::seq::SliceRandom;

const AUTHORS: &[&str] = &[
    "Alice",
    "Bob",
    "Иван",
    "Мария",
    "村上",
    "محمد",
    "🔥FireUser🔥",
    "+1 555 0100",
    "Dr. Who: The Doctor",
];

const EMOJIS: &[&str] = &[
    "😀", "😂", "🤣", "😍", "🥰", "🤔", "🙄", "😱", "🤯", "👻", "🤖", "🦄", "🌈", "🔥", "👍",
    "❤️", "🏳️‍🌈", "👨‍👩‍👧‍👦",
];

const WORDS: &[&str] = &[
    "pizza", "tonight", "meeting", "coffee", "weekend", "project", "train", "late", "thanks",
    "awesome", "really", "tomorrow", "photos", "birthday", "dinner", "beach",
];

/// The six timestamp layouts, in classifier priority order.
const LAYOUTS: usize = 6;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map(|s| s.as_str()).unwrap_or("heavy_chat.txt");

    println!("🧪 Chat Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!();

    let file = File::create(output)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file); // 1MB buffer

    let mut rng = rand::thread_rng();
    let start = Instant::now();
    let mut bytes_written: usize = 0;
    let mut clock = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap_or_default();

    for i in 0..count {
        clock += Duration::minutes(rng.gen_range(0..180));

        let mut block = if i % 97 == 0 {
            format!("{} {}\n", timestamp_prefix(clock, i % LAYOUTS), system_event(&mut rng))
        } else {
            let author = AUTHORS.choose(&mut rng).copied().unwrap_or("Alice");
            format!(
                "{} {}: {}\n",
                timestamp_prefix(clock, i % LAYOUTS),
                author,
                message_body(&mut rng, i)
            )
        };

        // Wrapped continuation lines
        if i % 13 == 0 {
            for _ in 0..rng.gen_range(1..=3) {
                block.push_str(&sentence(&mut rng));
                block.push('\n');
            }
        }

        // Blank separators and stray lines
        if i % 29 == 0 {
            block.push('\n');
        }
        if i % 1000 == 500 {
            block.push_str(garbage_line(&mut rng));
        }

        bytes_written += block.len();
        writer.write_all(block.as_bytes())?;

        if (i + 1) % 10000 == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            let mps = (i + 1) as f64 / elapsed;
            let mb = bytes_written as f64 / 1_000_000.0;
            eprint!(
                "\r   Generated {}/{} ({:.1} MB, {:.0} msg/s)",
                i + 1,
                count,
                mb,
                mps
            );
        }
    }

    writer.flush()?;

    let elapsed = start.elapsed();
    let mb = bytes_written as f64 / 1_000_000.0;

    println!("\n\n✅ Done!");
    println!("   Size: {:.2} MB", mb);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    println!(
        "   Speed: {:.0} msg/s",
        count as f64 / elapsed.as_secs_f64()
    );
    Ok(())
}

/// Timestamp (and separator) in one of the six layouts.
fn timestamp_prefix(ts: NaiveDateTime, layout: usize) -> String {
    let (pm, hour12) = ts.hour12();
    let meridiem = if pm { "PM" } else { "AM" };
    match layout {
        0 => format!(
            "{}, {}:{:02} {} -",
            ts.format("%-d/%-m/%Y"),
            hour12,
            ts.minute(),
            meridiem.to_lowercase()
        ),
        1 => format!("{} -", ts.format("%d/%m/%y, %H:%M")),
        2 => format!(
            "[{}, {}:{:02}:{:02} {}]",
            ts.format("%d/%m/%Y"),
            hour12,
            ts.minute(),
            ts.second(),
            meridiem
        ),
        3 => format!("{} -", ts.format("%m/%d/%Y, %H:%M")),
        4 => ts.format("%d-%m-%Y %H:%M").to_string(),
        _ => format!("{} \u{2013}", ts.format("%d.%m.%Y, %H:%M")),
    }
}

fn message_body(rng: &mut impl Rng, index: usize) -> String {
    match index % 12 {
        0 => "<Media omitted>".to_string(),
        1 => format!("check this https://example.com/{}", index),
        2 => format!("{} {}?", sentence(rng), "anyone"),
        3 => {
            let emojis: String = (0..rng.gen_range(1..8))
                .filter_map(|_| EMOJIS.choose(rng).copied())
                .collect();
            format!("{} {}", sentence(rng), emojis)
        }
        4 => "image omitted".to_string(),
        5 => format!("Кириллица: Привет мир! #{}", index),
        6 => format!("Mixed: Hello Привет 你好 🌍 #{}", index),
        7 => format!("www.example.org/{} is down", index),
        8 => {
            // Long message, exercises the longest-message preview
            let words: Vec<&str> = (0..60).filter_map(|_| WORDS.choose(rng).copied()).collect();
            words.join(" ")
        }
        _ => sentence(rng),
    }
}

fn sentence(rng: &mut impl Rng) -> String {
    let len = rng.gen_range(2..10);
    let words: Vec<&str> = (0..len).filter_map(|_| WORDS.choose(rng).copied()).collect();
    words.join(" ")
}

fn system_event(rng: &mut impl Rng) -> String {
    let who = AUTHORS.choose(rng).copied().unwrap_or("Alice");
    match rng.gen_range(0..4) {
        0 => format!("{} created group \"Weekend plans\"", who),
        1 => format!("{} added Bob", who),
        2 => "Messages and calls are end-to-end encrypted. No one outside of this chat can read them.".to_string(),
        _ => format!("{} left", who),
    }
}

fn garbage_line(rng: &mut impl Rng) -> &'static str {
    match rng.gen_range(0..4) {
        0 => "\nThis line has no timestamp or sender format\n",
        1 => "\n[Invalid date format here] - : message\n",
        2 => "\n-------------------------------------------\n",
        _ => "\n☠️💀👻 Random emoji line 👻💀☠️\n",
    }
}
