use std::fmt::Display;

use anyhow::Result;
use chrono::{DateTime, Local};
use chrono_english::parse_date_string;
use clap::{CommandFactory, ValueEnum};

use crate::aggregation::window::{Selection, ViewMode};

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

/// Arguments selecting what part of the history a command looks at.
#[derive(Debug, Clone, clap::Args)]
pub struct SelectionArgs {
    #[arg(long, short, default_value_t = ViewMode::Day, help = "Granularity of the view")]
    pub view: ViewMode,
    #[arg(
        long,
        short,
        help = "Reference date of the view, now by default. Examples are \"yesterday\", \"15/03/2025\", \"12:00 16/03/2025\""
    )]
    pub date: Option<String>,
    #[arg(
        long,
        short,
        default_value_t = 0,
        allow_negative_numbers = true,
        help = "Move the view by this many days, weeks or months. Negative values go back"
    )]
    pub offset: i32,
    #[command(flatten)]
    pub date_style: DateStyleArg,
}

#[derive(Debug, Clone, Copy, clap::Args)]
pub struct DateStyleArg {
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    pub date_style: DateStyle,
}

/// Parses user supplied date text relative to `now`.
pub fn parse_date(text: &str, now: DateTime<Local>, date_style: DateStyle) -> Result<DateTime<Local>> {
    match parse_date_string(text, now, date_style.into()) {
        Ok(v) => Ok(v),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate date {text}: {e}"),
            )
            .into()),
    }
}

impl SelectionArgs {
    pub fn to_selection(&self, now: DateTime<Local>) -> Result<Selection<Local>> {
        let reference = match &self.date {
            Some(text) => parse_date(text, now, self.date_style.date_style)?,
            None => now,
        };
        Ok(Selection::new(
            self.view,
            self.view.navigate(&reference, self.offset),
        ))
    }
}
