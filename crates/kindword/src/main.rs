use std::borrow::Cow;
use std::collections::HashSet;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use kindword_domain::{
    compile_rule, evaluate_catalog, Assessor, BasicTokenizer, CompiledRule, RuleCatalog, Tokenizer,
};
use kindword_types::{
    CatalogFile, FailOn, RuleConfig, SCORE_GOOD, SCORE_NON_INCLUSIVE,
    SCORE_POTENTIALLY_NON_INCLUSIVE,
};

mod config_loader;
mod env_expand;
mod report;

use config_loader::{load_catalog_with_includes, merge_catalogs};
use env_expand::expand_env_vars;
use report::{build_receipt, compute_exit_code, render_text};

const DEFAULT_CATALOG: &str = "kindword.toml";

#[derive(Parser)]
#[command(name = "kindword")]
#[command(about = "Inclusive-language checker for prose", long_about = None)]
struct Cli {
    /// Enable verbose (info-level) logging to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Enable debug-level logging to stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a text against every rule of the catalog.
    Check(CheckArgs),

    /// Print the effective rules (built-in + optional catalog merge).
    Rules(RulesArgs),

    /// Show detailed information about a specific rule.
    Explain(ExplainArgs),

    /// Validate a catalog file without assessing any text.
    Validate(ValidateArgs),

    /// Run test cases defined in rule configurations.
    Test(TestArgs),
}

/// Options shared by every command that loads a catalog.
#[derive(clap::Args, Debug, Clone)]
struct CatalogArgs {
    /// Path to a catalog file. If omitted, uses ./kindword.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable built-in rules; only use the catalog file.
    #[arg(long)]
    no_default_rules: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Text file to assess. Reads stdin when omitted or "-".
    input: Option<PathBuf>,

    #[command(flatten)]
    catalog: CatalogArgs,

    /// Only evaluate these rule IDs (repeatable).
    #[arg(long = "rule", action = clap::ArgAction::Append)]
    rules: Vec<String>,

    /// Only evaluate rules carrying at least one of these tags (repeatable).
    #[arg(long = "only-tag", action = clap::ArgAction::Append)]
    only_tags: Vec<String>,

    /// When to exit non-zero. Defaults to the catalog's setting.
    #[arg(long, value_enum)]
    fail_on: Option<FailOnArg>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also write the JSON report receipt to this path.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RulesArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    #[arg(long, value_enum, default_value_t = RulesFormat::Toml)]
    format: RulesFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RulesFormat {
    Toml,
    Json,
}

#[derive(Parser, Debug)]
struct ExplainArgs {
    /// The rule ID to explain (e.g., "mankind").
    rule_id: String,

    #[command(flatten)]
    catalog: CatalogArgs,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Path to a catalog file. If omitted, uses ./kindword.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also report best-practice warnings.
    #[arg(long)]
    strict: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct TestArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Only test rules whose ID starts with this prefix.
    #[arg(long)]
    rule: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FailOnArg {
    NonInclusive,
    Any,
    Never,
}

impl From<FailOnArg> for FailOn {
    fn from(v: FailOnArg) -> Self {
        match v {
            FailOnArg::NonInclusive => FailOn::NonInclusive,
            FailOnArg::Any => FailOn::Any,
            FailOnArg::Never => FailOn::Never,
        }
    }
}

fn main() -> std::process::ExitCode {
    match run_with_args(std::env::args_os()) {
        Ok(code) => std::process::ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("{err:?}");
            std::process::ExitCode::from(1)
        }
    }
}

fn run_with_args<I, T>(args: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    init_logging(cli.verbose, cli.debug);

    match cli.command {
        Commands::Check(args) => cmd_check(args),
        Commands::Rules(args) => {
            cmd_rules(args)?;
            Ok(0)
        }
        Commands::Explain(args) => {
            cmd_explain(args)?;
            Ok(0)
        }
        Commands::Validate(args) => cmd_validate(args),
        Commands::Test(args) => cmd_test(args),
    }
}

/// Initialize tracing/logging based on CLI flags.
fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("Logging initialized at level: {}", level);
}

fn cmd_check(args: CheckArgs) -> Result<i32> {
    let cfg = load_config(&args.catalog)?;
    let fail_on = args
        .fail_on
        .map(FailOn::from)
        .or(cfg.defaults.fail_on)
        .unwrap_or(FailOn::NonInclusive);

    let catalog = RuleCatalog::compile(&cfg.rule).context("compile rules")?;
    let rules = select_rules(&catalog, &args.rules, &args.only_tags)?;
    info!("Evaluating {} rule(s)", rules.len());

    let input = read_input(args.input.as_deref())?;
    let text = BasicTokenizer::new().tokenize(&input);
    debug!(
        "Tokenized {} sentence(s), {} token(s)",
        text.sentences.len(),
        text.token_count()
    );

    let evaluation = evaluate_catalog(&rules, &text);
    let receipt = build_receipt(&text, evaluation);

    if let Some(path) = &args.out {
        write_json(path, &receipt)?;
        info!("Wrote report to {}", path.display());
    }

    match args.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&receipt).context("render json")?
            );
        }
        OutputFormat::Text => print!("{}", render_text(&receipt)),
    }

    Ok(compute_exit_code(fail_on, &receipt.summary))
}

/// Narrow the catalog to the requested ids and tags. Unknown ids are errors.
fn select_rules(
    catalog: &RuleCatalog,
    ids: &[String],
    only_tags: &[String],
) -> Result<Vec<CompiledRule>> {
    for id in ids {
        catalog.get(id)?;
    }

    let selected: Vec<CompiledRule> = catalog
        .rules()
        .iter()
        .filter(|r| ids.is_empty() || ids.contains(&r.id))
        .filter(|r| only_tags.is_empty() || r.has_any_tag(only_tags))
        .cloned()
        .collect();

    if selected.is_empty() && !catalog.is_empty() {
        debug!("No rules left after filtering");
    }
    Ok(selected)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            std::fs::read_to_string(p).with_context(|| format!("read input {}", p.display()))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("read stdin")?;
            Ok(buf)
        }
    }
}

fn cmd_rules(args: RulesArgs) -> Result<()> {
    let cfg = load_config(&args.catalog)?;

    match args.format {
        RulesFormat::Toml => {
            let s = toml::to_string_pretty(&cfg).context("render toml")?;
            print!("{s}");
        }
        RulesFormat::Json => {
            let s = serde_json::to_string_pretty(&cfg).context("render json")?;
            print!("{s}");
        }
    }

    Ok(())
}

fn cmd_explain(args: ExplainArgs) -> Result<()> {
    let cfg = load_config(&args.catalog)?;

    match cfg.rule.iter().find(|r| r.id == args.rule_id) {
        Some(r) => {
            print!("{}", format_rule_explanation(r));
            Ok(())
        }
        None => {
            let suggestions = find_similar_rules(&args.rule_id, &cfg.rule);
            let mut msg = format!("Rule '{}' not found.", args.rule_id);

            if !suggestions.is_empty() {
                msg.push_str("\n\nDid you mean one of these?\n");
                for s in &suggestions {
                    msg.push_str(&format!("  - {s}\n"));
                }
            }

            msg.push_str("\nUse 'kindword rules' to list all available rules.");
            bail!("{}", msg);
        }
    }
}

fn format_rule_explanation(rule: &RuleConfig) -> String {
    let mut out = String::new();

    out.push_str(&format!("Rule: {}\n", rule.id));
    out.push_str(&format!("Category: {}\n", rule.category.as_str()));
    match rule.score {
        Some(score) => out.push_str(&format!("Score: {}\n", score)),
        None => out.push_str("Score: (missing)\n"),
    }

    out.push_str("\nPhrases:\n");
    for phrase in &rule.phrase {
        let forms: Vec<&str> = phrase.forms().collect();
        out.push_str(&format!("  - {}\n", forms.join(" | ")));
        if phrase.case_sensitive {
            out.push_str("    case sensitive\n");
        }
        if !phrase.followed_by.is_empty() {
            let classes: Vec<&str> = phrase.followed_by.iter().map(|c| c.as_str()).collect();
            out.push_str(&format!("    only when followed by: {}\n", classes.join(" or ")));
        }
        if !phrase.not_followed_by.is_empty() {
            out.push_str(&format!(
                "    not when followed by: {}\n",
                phrase.not_followed_by.join(", ")
            ));
        }
        if !phrase.not_preceded_by.is_empty() {
            out.push_str(&format!(
                "    not when preceded by: {}\n",
                phrase.not_preceded_by.join(", ")
            ));
        }
        if phrase.alternatives.is_empty() {
            out.push_str("    no alternative\n");
        } else {
            out.push_str(&format!(
                "    alternatives: {}\n",
                phrase.alternatives.join(", ")
            ));
        }
    }

    out.push_str("\nFeedback:\n");
    if let Some(t) = &rule.feedback.with_alternative {
        out.push_str(&format!("  with alternative: {t}\n"));
    }
    if let Some(t) = &rule.feedback.without_alternative {
        out.push_str(&format!("  without alternative: {t}\n"));
    }

    if !rule.tags.is_empty() {
        out.push_str(&format!("\nTags: {}\n", rule.tags.join(", ")));
    }

    out.push_str(&format!("\nSee also: {}\n", rule.effective_learn_more_url()));
    out
}

/// Find rules with similar IDs to the given rule_id.
fn find_similar_rules(rule_id: &str, rules: &[RuleConfig]) -> Vec<String> {
    let wanted = rule_id.to_lowercase();
    let mut candidates: Vec<(String, usize)> = Vec::new();

    for r in rules {
        let id = r.id.to_lowercase();

        if id.starts_with(&wanted) || wanted.starts_with(&id) {
            candidates.push((r.id.clone(), 0));
        } else if id.contains(&wanted) || wanted.contains(&id) {
            candidates.push((r.id.clone(), 1));
        } else {
            let distance = edit_distance(&wanted, &id);
            if distance <= 3 {
                candidates.push((r.id.clone(), distance + 2));
            }
        }
    }

    candidates.sort_by_key(|(_, score)| *score);
    candidates.truncate(5);
    candidates.into_iter().map(|(id, _)| id).collect()
}

/// Levenshtein distance over chars.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn cmd_validate(args: ValidateArgs) -> Result<i32> {
    info!("Validating catalog file");

    let Some(path) = args.config.clone().or_else(default_catalog_path) else {
        bail!("No catalog file found. Specify --config or create {DEFAULT_CATALOG}");
    };

    let cfg = load_catalog_with_includes(&path, expand_env)?;

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let mut seen: HashSet<&str> = HashSet::new();
    for rule in &cfg.rule {
        if !seen.insert(&rule.id) {
            errors.push(format!("Rule '{}': duplicate rule ID", rule.id));
        }
    }

    for rule in &cfg.rule {
        debug!("Validating rule: {}", rule.id);

        if let Err(e) = compile_rule(rule) {
            errors.push(e.to_string());
            continue;
        }

        if let Some(score) = rule.score.filter(|s| *s >= SCORE_GOOD) {
            errors.push(format!(
                "Rule '{}': score {} is in the good tier ({}); a matching rule must score lower",
                rule.id, score, SCORE_GOOD
            ));
            continue;
        }

        if args.strict {
            if rule.tags.is_empty() {
                warnings.push(format!("Rule '{}': no tags defined", rule.id));
            }
            if rule.test_cases.is_empty() {
                warnings.push(format!("Rule '{}': no test cases defined", rule.id));
            }
            if let Some(score) = rule
                .score
                .filter(|s| ![SCORE_NON_INCLUSIVE, SCORE_POTENTIALLY_NON_INCLUSIVE].contains(s))
            {
                warnings.push(format!(
                    "Rule '{}': score {} is neither the non-inclusive ({}) nor the potentially non-inclusive ({}) tier",
                    rule.id, score, SCORE_NON_INCLUSIVE, SCORE_POTENTIALLY_NON_INCLUSIVE
                ));
            }
        }
    }

    match args.format {
        OutputFormat::Json => {
            let result = serde_json::json!({
                "valid": errors.is_empty(),
                "path": path.display().to_string(),
                "rules_count": cfg.rule.len(),
                "errors": errors,
                "warnings": warnings,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Text => {
            println!("Validating {}...", path.display());
            println!();

            if !warnings.is_empty() {
                println!("Warnings ({}):", warnings.len());
                for (i, warn) in warnings.iter().enumerate() {
                    println!("  {}. {}", i + 1, warn);
                }
                println!();
            }

            if errors.is_empty() {
                println!("Catalog is valid!");
                println!("  {} rule(s) defined", cfg.rule.len());
            } else {
                println!("Catalog has {} error(s):", errors.len());
                println!();
                for (i, err) in errors.iter().enumerate() {
                    println!("  {}. {}", i + 1, err);
                }
            }
        }
    }

    Ok(if errors.is_empty() { 0 } else { 1 })
}

fn cmd_test(args: TestArgs) -> Result<i32> {
    info!("Running rule test cases");

    let cfg = load_config(&args.catalog)?;

    let rules: Vec<&RuleConfig> = match &args.rule {
        Some(prefix) => cfg.rule.iter().filter(|r| r.id.starts_with(prefix)).collect(),
        None => cfg.rule.iter().collect(),
    };

    if rules.is_empty() {
        match &args.rule {
            Some(filter) => bail!("No rules match filter '{}'", filter),
            None => bail!("No rules defined in catalog"),
        }
    }

    let total_tests: usize = rules.iter().map(|r| r.test_cases.len()).sum();
    let tokenizer = BasicTokenizer::new();

    let mut passed = 0;
    let mut failed = 0;
    let mut failures: Vec<serde_json::Value> = Vec::new();

    for rule in &rules {
        if rule.test_cases.is_empty() {
            continue;
        }

        let assessor = match Assessor::new(rule) {
            Ok(a) => a,
            Err(e) => {
                for tc in &rule.test_cases {
                    failed += 1;
                    failures.push(serde_json::json!({
                        "rule_id": rule.id,
                        "input": tc.input,
                        "error": format!("Rule compilation failed: {}", e),
                    }));
                }
                continue;
            }
        };

        for tc in &rule.test_cases {
            let applies = assessor.assess(&tokenizer.tokenize(&tc.input)).is_applicable();

            if applies == tc.should_match {
                passed += 1;
            } else {
                failed += 1;
                failures.push(serde_json::json!({
                    "rule_id": rule.id,
                    "input": tc.input,
                    "should_match": tc.should_match,
                    "actual_match": applies,
                    "description": tc.description,
                }));
            }
        }
    }

    match args.format {
        OutputFormat::Json => {
            let result = serde_json::json!({
                "rules_checked": rules.len(),
                "test_cases": total_tests,
                "passed": passed,
                "failed": failed,
                "failures": failures,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Text if total_tests == 0 => {
            println!("No test cases defined in {} rule(s).", rules.len());
            println!("\nTo add test cases, add them to your rule definitions:");
            println!("  [[rule.test_cases]]");
            println!("  input = \"text that should match\"");
            println!("  should_match = true");
        }
        OutputFormat::Text => {
            println!("Rule tests:");
            println!("  Rules checked: {}", rules.len());
            println!("  Test cases: {}", total_tests);
            println!("  Passed: {}", passed);
            println!("  Failed: {}", failed);

            if !failures.is_empty() {
                println!("\nFailures:");
                for (i, f) in failures.iter().enumerate() {
                    println!(
                        "\n  {}. Rule '{}': input \"{}\"",
                        i + 1,
                        f["rule_id"].as_str().unwrap_or(""),
                        f["input"].as_str().unwrap_or("")
                    );
                    if let Some(desc) = f["description"].as_str() {
                        println!("     Description: {}", desc);
                    }
                    if let Some(err) = f["error"].as_str() {
                        println!("     Error: {}", err);
                    } else {
                        println!(
                            "     Expected match: {}, got: {}",
                            f["should_match"], f["actual_match"]
                        );
                    }
                }
            }
        }
    }

    Ok(if failed > 0 { 1 } else { 0 })
}

fn default_catalog_path() -> Option<PathBuf> {
    let p = PathBuf::from(DEFAULT_CATALOG);
    p.exists().then_some(p)
}

fn expand_env(text: &str) -> Result<String> {
    expand_env_vars(text).map(Cow::into_owned)
}

fn load_config(args: &CatalogArgs) -> Result<CatalogFile> {
    let Some(path) = args.config.clone().or_else(default_catalog_path) else {
        debug!("No catalog file found, using built-in rules");
        return Ok(CatalogFile::built_in());
    };

    info!("Loading catalog from: {}", path.display());
    let parsed = load_catalog_with_includes(&path, expand_env)?;
    debug!("Loaded {} rule(s) from catalog", parsed.rule.len());

    if args.no_default_rules {
        return Ok(parsed);
    }

    Ok(merge_catalogs(CatalogFile::built_in(), parsed))
}

fn write_json(path: &Path, value: &impl serde::Serialize) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
    }

    let bytes = serde_json::to_vec_pretty(value).context("serialize receipt")?;
    std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
