//! # Rendering
//!
//! Layout (widths, truncation, padding) is computed here with
//! `unicode-width`, since names and avatars are full of wide characters.
//! Every `render_*` function returns a `String`; color is applied only when
//! the terminal supports it, so the plain output is what tests assert on.

use campus::api::{CmdMessage, MessageLevel};
use campus::avatar::{initials, DEFAULT_AVATARS};
use campus::controller::{Notice, NoticeKind};
use campus::model::{Avatar, Student};
use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const ID_WIDTH: usize = 4;
pub const AVATAR_WIDTH: usize = 3;
pub const NAME_WIDTH: usize = 24;
pub const EMAIL_WIDTH: usize = 32;

fn use_color() -> bool {
    colored::control::SHOULD_COLORIZE.should_colorize()
}

pub fn render_student_list(students: &[&Student], summary: &str) -> String {
    render_student_list_internal(students, summary, use_color())
}

fn render_student_list_internal(students: &[&Student], summary: &str, color: bool) -> String {
    let mut output = String::new();
    if color {
        output.push_str(&format!("{}\n", summary.bold()));
    } else {
        output.push_str(&format!("{}\n", summary));
    }

    if students.is_empty() {
        output.push_str("No students found.\n");
        return output;
    }

    output.push('\n');
    for student in students {
        let id = format!("{:>width$}", student.id, width = ID_WIDTH);
        let avatar = pad_to_width(&avatar_glyph(student), AVATAR_WIDTH);
        let name = pad_to_width(&truncate_to_width(&student.name, NAME_WIDTH), NAME_WIDTH);
        let email = pad_to_width(&truncate_to_width(&student.email, EMAIL_WIDTH), EMAIL_WIDTH);

        if color {
            output.push_str(&format!(
                "{}  {} {}  {}  {}\n",
                id.yellow(),
                avatar,
                name,
                email.dimmed(),
                student.role.cyan()
            ));
        } else {
            output.push_str(&format!(
                "{}  {} {}  {}  {}\n",
                id, avatar, name, email, student.role
            ));
        }
    }
    output
}

pub fn render_student_detail(student: &Student) -> String {
    render_student_detail_internal(student, use_color())
}

fn render_student_detail_internal(student: &Student, color: bool) -> String {
    let mut output = String::new();
    let glyph = avatar_glyph(student);
    if color {
        output.push_str(&format!("{} {}\n", glyph, student.name.bold()));
    } else {
        output.push_str(&format!("{} {}\n", glyph, student.name));
    }
    output.push_str("--------------------------------\n");
    output.push_str(&format!("Email:   {}\n", student.email));
    output.push_str(&format!("Role:    {}\n", student.role));
    output.push_str(&format!("Avatar:  {}\n", describe_avatar(student.avatar.as_ref())));
    output.push_str(&format!("ID:      {}\n", student.id));
    output
}

/// The numbered default set, as accepted by `--avatar N`.
pub fn render_avatars() -> String {
    DEFAULT_AVATARS
        .iter()
        .enumerate()
        .map(|(i, (emoji, color))| format!("{:>3}. {}  {}\n", i + 1, emoji, color))
        .collect()
}

pub fn render_text_list(lines: &[String], empty_message: &str) -> String {
    if lines.is_empty() {
        return format!("{}\n", empty_message);
    }
    lines.iter().map(|line| format!("{}\n", line)).collect()
}

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn print_notice(notice: &Notice) {
    match notice.kind {
        NoticeKind::Success => println!("{}", notice.message.green()),
        NoticeKind::Error => eprintln!("{}", notice.message.red()),
    }
}

fn avatar_glyph(student: &Student) -> String {
    match &student.avatar {
        Some(Avatar::Emoji { emoji, .. }) => emoji.clone(),
        Some(Avatar::Image(_)) => "▣".to_string(),
        None => initials(&student.name).chars().take(2).collect(),
    }
}

fn describe_avatar(avatar: Option<&Avatar>) -> String {
    match avatar {
        Some(Avatar::Emoji { emoji, color }) => format!("{} ({})", emoji, color),
        Some(Avatar::Image(reference)) => format!("image {}", reference),
        None => "default".to_string(),
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
