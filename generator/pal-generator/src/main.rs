use anyhow::Context;
use colored::Colorize;
use dmmf::SchemaGraph;
use prisma_select::{PrismaSelect, PrismaSelectOptions, ResolveTree};
use std::{fs, io::Write};
use structopt::*;
use type_generator::{GenerateTypes, GeneratorConfig, SdlInputs};

#[derive(Debug, StructOpt)]
enum Command {
    /// Generate the resolver type declarations of a DMMF schema.
    Types(Generate),
    /// Generate the SDL of the library types (inputs, enums, aggregates).
    Sdl(Generate),
    /// Prune a resolve tree into the select argument of a data layer call.
    Select(Select),
}

#[derive(Debug, StructOpt)]
struct Generate {
    /// Path of a DMMF JSON document. Repeat to merge several documents.
    #[structopt(long = "dmmf", required = true)]
    dmmf: Vec<String>,
    /// Path of a JSON generator configuration.
    #[structopt(long)]
    config: Option<String>,
    /// Where to write the generated text. Defaults to stdout.
    #[structopt(long)]
    output: Option<String>,
}

#[derive(Debug, StructOpt)]
struct Select {
    /// Path of a DMMF JSON document. Repeat to merge several documents.
    #[structopt(long = "dmmf", required = true)]
    dmmf: Vec<String>,
    /// Path of the resolve tree JSON of the requested field.
    #[structopt(long)]
    tree: String,
    /// GraphQL return type of the requested field, e.g. `[User!]!`.
    #[structopt(long = "return-type")]
    return_type: String,
    /// Path of the JSON pruning options.
    #[structopt(long)]
    options: Option<String>,
}

fn main() -> anyhow::Result<()> {
    init_logger();

    match Command::from_args() {
        Command::Types(cmd) => {
            let graph = load_graph(&cmd.dmmf)?;
            let config = load_config(cmd.config.as_deref())?;

            write_output(cmd.output.as_deref(), &GenerateTypes::new(&graph, &config).run())?;
        }
        Command::Sdl(cmd) => {
            let graph = load_graph(&cmd.dmmf)?;
            let config = load_config(cmd.config.as_deref())?;

            write_output(cmd.output.as_deref(), &SdlInputs::new(&graph, &config).run())?;
        }
        Command::Select(cmd) => {
            let graph = load_graph(&cmd.dmmf)?;

            let tree: ResolveTree = serde_json::from_str(&read_file(&cmd.tree)?)
                .with_context(|| format!("Invalid resolve tree in {}", cmd.tree))?;

            let options: PrismaSelectOptions = match &cmd.options {
                Some(path) => serde_json::from_str(&read_file(path)?)
                    .with_context(|| format!("Invalid pruning options in {path}"))?,
                None => PrismaSelectOptions::default(),
            };

            let select = PrismaSelect::new(&graph, &tree, &cmd.return_type, options).value()?;

            println!("{}", serde_json::to_string_pretty(&select)?);
        }
    }

    Ok(())
}

fn read_file(path: &str) -> anyhow::Result<String> {
    eprintln!("{} {}", "reading".bold(), path.yellow());

    fs::read_to_string(path).with_context(|| format!("Could not read {path}"))
}

fn load_graph(paths: &[String]) -> anyhow::Result<SchemaGraph> {
    let documents = paths.iter().map(|path| read_file(path)).collect::<anyhow::Result<Vec<_>>>()?;

    SchemaGraph::load_many(documents.iter().map(String::as_str)).context("Could not load the DMMF schema")
}

fn load_config(path: Option<&str>) -> anyhow::Result<GeneratorConfig> {
    match path {
        Some(path) => Ok(GeneratorConfig::from_json(&read_file(path)?)?),
        None => Ok(GeneratorConfig::default()),
    }
}

fn write_output(path: Option<&str>, generated: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, generated).with_context(|| format!("Could not write {path}"))?;
            eprintln!("{} {}", "wrote".bold(), path.green());
        }
        None => std::io::stdout().write_all(generated.as_bytes())?,
    }

    Ok(())
}

fn init_logger() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| eprintln!("Error initializing the global logger: {err}"))
        .ok();
}
