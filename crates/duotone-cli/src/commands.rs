//! Subcommand implementations. Each returns the text to print.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use duotone::{builtin_table, load_table, split_roles, AttributeSet, StyleRole, ThemeTable};

use crate::cli::{Cli, Commands, OutputFormat, ResolveArgs};

/// Runs the parsed command line.
pub fn run(cli: &Cli) -> Result<String> {
    let table = load(cli.table.as_deref())?;
    match &cli.command {
        Commands::Resolve(args) => resolve(&table, args),
        Commands::Check => Ok(check(&table, cli.table.as_deref())),
        Commands::Roles => Ok(roles(&table)),
    }
}

fn load(path: Option<&Path>) -> Result<Arc<ThemeTable>> {
    match path {
        Some(path) => {
            let table = load_table(path)
                .with_context(|| format!("loading theme table from {}", path.display()))?;
            Ok(Arc::new(table))
        }
        None => builtin_table().context("loading built-in theme table"),
    }
}

fn resolve(table: &ThemeTable, args: &ResolveArgs) -> Result<String> {
    let roles: Vec<StyleRole> = args.roles.iter().flat_map(|arg| split_roles(arg)).collect();
    tracing::debug!(?roles, mode = %args.mode, "resolving");

    let resolved = table
        .resolve(&roles, args.mode)
        .with_context(|| format!("resolving {} in {} mode", args.roles.join(" "), args.mode))?;
    render(&resolved, args.format)
}

fn render(attributes: &AttributeSet, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Style => attributes.to_inline_style(),
        OutputFormat::Classes => attributes.to_class_names().join(" "),
        OutputFormat::Json => serde_json::to_string_pretty(attributes)?,
        OutputFormat::Yaml => serde_yaml::to_string(attributes)?.trim_end().to_string(),
    };
    Ok(text)
}

fn check(table: &ThemeTable, source: Option<&Path>) -> String {
    let source = source
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "built-in table".to_string());
    format!("{}: {} roles ok", source, table.len())
}

fn roles(table: &ThemeTable) -> String {
    table
        .entries()
        .map(|entry| {
            let mut line = format!("{} [{}]", entry.role(), entry.layer());
            if !entry.includes().is_empty() {
                let includes: Vec<&str> = entry.includes().iter().map(StyleRole::as_str).collect();
                line.push_str(&format!(" includes {}", includes.join(", ")));
            }
            if entry.dark().is_some() {
                line.push_str(" (dark)");
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["duotone"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn write_table(dir: &TempDir) -> String {
        let path = dir.path().join("theme.css");
        fs::write(
            &path,
            r#"
            .color-is-selected { background: green-500; color: white; }
            .dark .color-is-selected { background: green-400; color: slate-200; }
            .disabled { layer: disabled; background: gray-300; color: gray-500; }
            .dark .disabled { background: zinc-600; color: slate-300; }
            .progress-bar-fill { composes: color-is-selected; border-radius: full; }
            "#,
        )
        .unwrap();
        path.display().to_string()
    }

    #[test]
    fn test_resolve_style_output() {
        let dir = TempDir::new().unwrap();
        let table = write_table(&dir);
        let out = run(&parse(&[
            "resolve",
            "--table",
            &table,
            "--mode",
            "dark",
            "color-is-selected",
            "disabled",
        ]))
        .unwrap();
        assert_eq!(out, "background-color: zinc-600; color: slate-300");
    }

    #[test]
    fn test_resolve_composite_argument() {
        let dir = TempDir::new().unwrap();
        let table = write_table(&dir);
        let out = run(&parse(&[
            "resolve",
            "--table",
            &table,
            "--mode",
            "light",
            "-f",
            "classes",
            "color-is-selected+disabled",
        ]))
        .unwrap();
        assert_eq!(out, "bg-gray-300 text-gray-500");
    }

    #[test]
    fn test_resolve_json_output() {
        let dir = TempDir::new().unwrap();
        let table = write_table(&dir);
        let out = run(&parse(&[
            "resolve",
            "--table",
            &table,
            "--mode",
            "light",
            "--format",
            "json",
            "progress-bar-fill",
        ]))
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["background"], "green-500");
        assert_eq!(value["border-radius"], "full");
    }

    #[test]
    fn test_resolve_unknown_role_has_context() {
        let dir = TempDir::new().unwrap();
        let table = write_table(&dir);
        let err = run(&parse(&["resolve", "--table", &table, "--mode", "light", "ghost"]))
            .unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("resolving ghost"), "{chain}");
        assert!(chain.contains("unknown style role 'ghost'"), "{chain}");
    }

    #[test]
    fn test_check_reports_role_count() {
        let dir = TempDir::new().unwrap();
        let table = write_table(&dir);
        let out = run(&parse(&["check", "--table", &table])).unwrap();
        assert!(out.ends_with("3 roles ok"), "{out}");
    }

    #[test]
    fn test_check_builtin() {
        let out = run(&parse(&["check"])).unwrap();
        assert!(out.starts_with("built-in table: "), "{out}");
    }

    #[test]
    fn test_check_missing_table() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.yaml").display().to_string();
        let err = run(&parse(&["check", "--table", &missing])).unwrap_err();
        assert!(format!("{err:#}").contains("loading theme table"));
    }

    #[test]
    fn test_roles_empty_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.yaml");
        fs::write(&path, "").unwrap();
        let table = path.display().to_string();
        assert_eq!(run(&parse(&["roles", "--table", &table])).unwrap(), "");
    }

    #[test]
    fn test_roles_listing() {
        let dir = TempDir::new().unwrap();
        let table = write_table(&dir);
        let out = run(&parse(&["roles", "--table", &table])).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "color-is-selected [base] (dark)",
                "disabled [disabled] (dark)",
                "progress-bar-fill [base] includes color-is-selected",
            ]
        );
    }
}
