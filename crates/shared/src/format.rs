//! Human-facing labels derived from a [`Response`](crate::domain::Response).
//!
//! The page and both notification channels speak Spanish; every label here is
//! a pure function of the answer, so nothing user-supplied leaks into them.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::domain::Answer;

pub const INVITATION_LABEL: &str = "invitacion";

pub fn result_heading(answer: Answer) -> &'static str {
    match answer {
        Answer::Yes => "¡Fantástico! 🎉",
        Answer::No => "Respuesta recibida 💝",
    }
}

pub fn admin_label(answer: Answer) -> &'static str {
    match answer {
        Answer::Yes => "✅ SÍ",
        Answer::No => "❌ NO",
    }
}

pub fn short_label(answer: Answer) -> &'static str {
    match answer {
        Answer::Yes => "SÍ",
        Answer::No => "NO",
    }
}

pub fn issue_answer_line(answer: Answer) -> &'static str {
    match answer {
        Answer::Yes => "✅ SÍ, acepto la invitación!",
        Answer::No => "❌ No, gracias",
    }
}

pub fn email_answer_label(answer: Answer) -> &'static str {
    match answer {
        Answer::Yes => "✅ SÍ ACEPTA",
        Answer::No => "❌ NO ACEPTA",
    }
}

pub fn answer_issue_label(answer: Answer) -> &'static str {
    match answer {
        Answer::Yes => "respuesta-si",
        Answer::No => "respuesta-no",
    }
}

/// Renders `at` the way the `es-ES` locale prints a date-time:
/// `D/M/YYYY, H:MM:SS`, with no padding on day, month or hour.
pub fn format_es<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%-d/%-m/%Y, %-H:%M:%S").to_string()
}

pub fn format_es_local(at: DateTime<Utc>) -> String {
    format_es(&at.with_timezone(&Local))
}
