use std::error::Error;
use std::fs;

use clap::{App, Arg, ArgMatches};
use pycodegen::codegen;
use pycodegen::syntax::annotate::annotate_parents;
use pycodegen::syntax::ast::NodeRef;
use pycodegen::visualize::Visualizer;

fn main() {
    let matches = App::new("pycodegen")
        .version("0.1.0")
        .about("Regenerates Python source code from a serialized abstract syntax tree and \
        visualizes the tree with the help of GraphViz/DOT.")
        .arg(Arg::new("tree")
            .value_name("FILE")
            .help("Path to a JSON-serialized node tree as produced by the upstream parser.")
            .required(true))
        .arg(Arg::new("indent")
            .long("indent")
            .value_name("STRING")
            .help("String emitted per indentation level. Defaults to four spaces.")
            .takes_value(true))
        .arg(Arg::new("visualize")
            .long("visualize")
            .value_name("PATH")
            .help("Annotates the tree with parent links, renders it as a labeled graph and \
            outputs PATH.dot as well as PATH.pdf.")
            .takes_value(true))
        .arg(Arg::new("verbose")
            .short('v')
            .help("Output the loaded tree. Useful for debugging.")
            .takes_value(false))
        .get_matches();

    if let Err(err) = run(&matches) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let path = args.value_of("tree").unwrap();
    let src = fs::read_to_string(path)?;
    let root: NodeRef = serde_json::from_str(&src)?;

    if args.is_present("verbose") {
        println!("Tree:");
        println!("{:#?}", root);
    }

    let indent_with = args.value_of("indent").unwrap_or("    ");
    println!("{}", codegen::to_source(&root, indent_with)?);

    if let Some(out) = args.value_of("visualize") {
        annotate_parents(&root);
        let mut visualizer = Visualizer::new("ast");
        visualizer.visualize(&root)?;
        visualizer.write_to_dot(&format!("{}.dot", out))?;
        // PDF rendering needs the GraphViz binary; the DOT file alone is
        // still useful without it.
        if let Err(err) = visualizer.write_to_pdf(&format!("{}.pdf", out)) {
            eprintln!("could not render {}.pdf (is GraphViz installed?): {}", out, err);
        }
    }
    Ok(())
}
