mod dec;
mod detect;
mod enc;
mod info;
mod list;
mod preview;

pub use dec::run_decode;
pub use detect::run_detect;
pub use enc::{format_encode_all, run_encode, run_encode_all};
pub use info::run_info;
pub use list::run_list;
pub use preview::run_preview;

use serde::Serialize;

use crate::io::{write_output, OutputConfig};
use mtrans::error::{MtransError, Result};
use mtrans::settings::Options;
use mtrans::transform::Entry;
use mtrans::types::{Context, InputSource, OutputDest};

pub trait CommandHandler {
    fn execute(&self, ctx: &Context) -> Result<()>;
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{}", json);
    Ok(())
}

/// Configured options for `transform` with `name=value` overrides on top.
fn options_for<'a>(ctx: &'a Context, transform: &str, overrides: &[String]) -> Result<(&'a Entry, Options)> {
    let entry = ctx.registry.entry(transform)?;
    if overrides.is_empty() {
        return Ok((entry, ctx.settings.options(entry.key()).clone()));
    }

    let mut settings = ctx.settings.clone();
    for raw in overrides {
        let (name, value) = raw
            .split_once('=')
            .ok_or_else(|| MtransError::invalid_input(format!("expected NAME=VALUE, got '{}'", raw)))?;
        settings.set_raw(ctx.registry, entry.key(), name.trim(), value)?;
    }
    Ok((entry, settings.options(entry.key()).clone()))
}

fn truncate_display(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

pub struct EncCommand {
    pub transform: String,
    pub overrides: Vec<String>,
    pub input: InputSource,
    pub output: OutputDest,
    pub all: bool,
    pub json: bool,
}

impl CommandHandler for EncCommand {
    fn execute(&self, ctx: &Context) -> Result<()> {
        if self.all {
            let results = run_encode_all(ctx, &self.input)?;
            if self.json {
                return print_json(&results);
            }
            let config = OutputConfig {
                dest: self.output.clone(),
                escape_invisible: false,
            };
            return write_output(&format_encode_all(&results), &config);
        }

        let result = run_encode(ctx, &self.transform, &self.overrides, &self.input)?;
        if self.json {
            return print_json(&result);
        }
        let config = OutputConfig {
            dest: self.output.clone(),
            escape_invisible: true,
        };
        write_output(&result.output, &config)
    }
}

pub struct DecCommand {
    pub transform: String,
    pub overrides: Vec<String>,
    pub input: InputSource,
    pub output: OutputDest,
    pub json: bool,
}

impl CommandHandler for DecCommand {
    fn execute(&self, ctx: &Context) -> Result<()> {
        let result = run_decode(ctx, &self.transform, &self.overrides, &self.input)?;
        if self.json {
            return print_json(&result);
        }
        let config = OutputConfig {
            dest: self.output.clone(),
            escape_invisible: true,
        };
        write_output(&result.output, &config)
    }
}

pub struct DetectCommand {
    pub input: InputSource,
    pub active: Option<String>,
    pub json: bool,
    pub top: usize,
}

impl CommandHandler for DetectCommand {
    fn execute(&self, ctx: &Context) -> Result<()> {
        let report = run_detect(ctx, &self.input, self.active.as_deref(), self.top)?;

        if self.json {
            return print_json(&report);
        }

        println!("Input: {}", report.input_preview);
        println!();
        match (&report.text, &report.method) {
            (Some(text), Some(method)) => {
                println!("Method: {}", method);
                println!("Result: {}", text);
                if !report.alternatives.is_empty() {
                    println!();
                    println!("{:<22} ALTERNATIVE", "METHOD");
                    println!("{}", "-".repeat(60));
                    for alt in &report.alternatives {
                        println!("{:<22} {}", alt.method, truncate_display(&alt.text, 50));
                    }
                }
            }
            _ => println!("No decoding found."),
        }
        Ok(())
    }
}

pub struct ListCommand {
    pub json: bool,
    pub category: Option<String>,
}

impl CommandHandler for ListCommand {
    fn execute(&self, ctx: &Context) -> Result<()> {
        let transforms = run_list(ctx, self.category.as_deref())?;
        if self.json {
            return print_json(&transforms);
        }
        println!("{:<18} {:<14} {:<6} DESCRIPTION", "KEY", "CATEGORY", "PRIO");
        println!("{}", "-".repeat(70));
        for t in transforms {
            let priority = t.priority.map_or("-".to_string(), |p| p.to_string());
            println!("{:<18} {:<14} {:<6} {}", t.key, t.category, priority, t.description);
        }
        Ok(())
    }
}

pub struct InfoCommand {
    pub transform: String,
    pub json: bool,
}

impl CommandHandler for InfoCommand {
    fn execute(&self, ctx: &Context) -> Result<()> {
        let info = run_info(ctx, &self.transform)?;
        if self.json {
            return print_json(&info);
        }
        println!("Key:         {}", info.meta.key);
        println!("Name:        {}", info.meta.name);
        println!("Category:    {}", info.meta.category);
        println!(
            "Priority:    {}",
            info.meta.priority.map_or("-".to_string(), |p| p.to_string())
        );
        println!(
            "Decode:      {}",
            if info.capability.can_decode() { "yes" } else { "no" }
        );
        println!(
            "Detect:      {}",
            if info.capability.can_detect() { "yes" } else { "no" }
        );
        println!("Description: {}", info.meta.description);
        if !info.settings.is_empty() {
            println!("Settings:");
            for s in &info.settings {
                println!("  {:<12} default {:<8} {}", s.name, s.default.to_string(), s.description);
            }
        }
        Ok(())
    }
}

pub struct PreviewCommand {
    pub transform: String,
    pub sample: String,
}

impl CommandHandler for PreviewCommand {
    fn execute(&self, ctx: &Context) -> Result<()> {
        let rendered = run_preview(ctx, &self.transform, &self.sample)?;
        let config = OutputConfig {
            dest: OutputDest::Stdout,
            escape_invisible: true,
        };
        write_output(&rendered, &config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_for_overrides() {
        let ctx = Context::default();
        let (entry, opts) = options_for(&ctx, "Caesar Cipher", &["shift=10".to_string()]).unwrap();
        assert_eq!(entry.key(), "caesar");
        assert_eq!(opts.number("shift"), Some(10));
        assert_eq!(ctx.settings.options("caesar").number("shift"), Some(3));
    }

    #[test]
    fn test_options_for_bad_override() {
        let ctx = Context::default();
        assert!(matches!(
            options_for(&ctx, "caesar", &["shift".to_string()]),
            Err(MtransError::InvalidInput { .. })
        ));
        assert!(matches!(
            options_for(&ctx, "caesar", &["shift=x".to_string()]),
            Err(MtransError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_truncate_display() {
        assert_eq!(truncate_display("short", 10), "short");
        assert_eq!(truncate_display("😀😀😀😀😀😀", 5), "😀😀...");
    }
}
