//! Interactive stdin prompts. The parsing is pure and separately testable;
//! the loops around it only re-prompt.

use std::io::{self, BufRead, Write};

const KNOWN_HOSTS: [&str; 3] = ["youtube.com", "youtu.be", "m.youtube.com"];

/// Outcome of parsing one quality-selection input.
#[derive(Debug, PartialEq, Eq)]
pub enum Choice {
    /// 0-based index into the menu.
    Selected(usize),
    Quit,
    Invalid(String)
}

/// Parse a 1-based menu choice. `q` quits; anything non-numeric or out of
/// [1, max] is invalid with a re-promptable message.
pub fn parse_choice(input: &str, max: usize) -> Choice {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") {
        return Choice::Quit;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=max).contains(&n) => Choice::Selected(n - 1),
        Ok(_) => Choice::Invalid(format!("Please enter a number between 1 and {max}.")),
        Err(_) => Choice::Invalid("Please enter a valid number or 'q' to quit.".to_string())
    }
}

pub fn looks_like_youtube_url(url: &str) -> bool {
    KNOWN_HOSTS.iter().any(|host| url.contains(host))
}

/// Print a prompt and read one trimmed line. `None` means stdin hit EOF,
/// which callers treat like a quit.
async fn read_line(message: &str) -> io::Result<Option<String>> {
    let message = message.to_string();
    tokio::task::spawn_blocking(move || {
        let mut stdout = io::stdout();
        stdout.write_all(message.as_bytes())?;
        stdout.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            Ok(None)
        } else {
            Ok(Some(line.trim().to_string()))
        }
    })
    .await
    .map_err(io::Error::other)?
}

/// Prompt for a URL until it looks plausible. `None` means the user quit.
pub async fn read_url() -> io::Result<Option<String>> {
    loop {
        let Some(url) = read_line("Enter YouTube URL (or 'q' to quit): ").await? else {
            return Ok(None);
        };
        if url.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        if url.is_empty() {
            println!("Please enter a valid URL.");
            continue;
        }
        if !looks_like_youtube_url(&url) {
            println!("This doesn't look like a YouTube URL. Please try again.");
            continue;
        }
        return Ok(Some(url));
    }
}

/// Prompt for a menu index until the input is valid. `None` means the user
/// cancelled.
pub async fn choose_quality(max: usize) -> io::Result<Option<usize>> {
    loop {
        let message = format!("Select quality (1-{max}) or 'q' to quit: ");
        let Some(input) = read_line(&message).await? else {
            return Ok(None);
        };
        match parse_choice(&input, max) {
            Choice::Selected(index) => return Ok(Some(index)),
            Choice::Quit => return Ok(None),
            Choice::Invalid(message) => println!("{message}")
        }
    }
}

pub async fn confirm(message: &str) -> io::Result<bool> {
    let Some(answer) = read_line(message).await? else {
        return Ok(false);
    };
    let answer = answer.to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
