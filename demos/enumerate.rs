use clap::Parser;

use boolfunc::point::{enumerate_terms, enumerate_upoints, index_to_point};
use boolfunc::var::{intern, Literal, Variable};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Variable names (qualified names use dots, e.g. `top.a`).
    #[arg(value_name = "NAME", required = true)]
    names: Vec<String>,

    /// Index given to every variable (repeat for multi-dimensional indices).
    #[clap(long = "index", value_name = "INT")]
    indices: Vec<i64>,

    /// Print maxterms instead of minterms.
    #[clap(long)]
    conj: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    let mut vs: Vec<Variable> = Vec::new();
    for name in &args.names {
        // `top.a` is the variable `a` qualified by `top`: most specific name first.
        let names: Vec<&str> = name.split('.').rev().collect();
        vs.push(intern(&names, &args.indices)?);
    }
    println!("vars = {:?}", vs);

    let lits: Vec<Literal> = vs.iter().map(Variable::pos).collect();
    let kind = if args.conj { "maxterm" } else { "minterm" };

    for (num, (upoint, term)) in enumerate_upoints(&vs)
        .zip(enumerate_terms(&lits, args.conj))
        .enumerate()
    {
        let point = index_to_point(num as u64, &vs);
        let bits: Vec<String> = point
            .iter()
            .map(|(v, &value)| format!("{}={}", v, value as u8))
            .collect();
        let term: Vec<String> = term.iter().map(|lit| lit.to_string()).collect();
        let zeros: Vec<u32> = upoint.zeros.iter().map(|id| id.get()).collect();
        let ones: Vec<u32> = upoint.ones.iter().map(|id| id.get()).collect();
        println!(
            "{:>4}: {{{}}}  upoint=({:?}, {:?})  {}={}",
            num,
            bits.join(", "),
            zeros,
            ones,
            kind,
            term.join(" ")
        );
    }

    Ok(())
}
