use log::info;
use rs_markov_core::io::{build_output_path, get_filename, list_files, normalize_folder, open_file};
use rs_markov_core::{ChainConfig, MarkovChain, render_sentence};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Folder containing the corpora (one .txt file per corpus)
    let folder = normalize_folder(&std::env::args().nth(1).unwrap_or_else(|| "./data".to_owned()));

    // Tuple order 1, phrases closed on ";.?!", random seed from the OS
    let config = ChainConfig::default();
    let tokenizer = config.tokenizer();

    for file in list_files(&folder, "txt")? {
        let path = folder.join(&file);
        let name = get_filename(&path)?;

        // One chain per corpus
        let mut chain = MarkovChain::from_config(&config)?;
        let phrases = tokenizer.learn_reader(&mut chain, open_file(&path)?)?;
        let stats = chain.stats();
        info!("{name}: {phrases} phrases, {} nodes, {} edges", stats.node_count, stats.edge_count);

        // Whole phrases, walking until the trailer
        println!("== {name}");
        for i in 0..5 {
            println!("Sentence {}: {}", i + 1, chain.make_sentence()?);
        }

        // Phrases heading for their end once 12 words are reached
        for i in 0..5 {
            println!("Bounded sentence {}: {}", i + 1, chain.make_bounded_sentence(12)?);
        }

        // Gradual generation, one word per call
        let mut words = Vec::new();
        while let Some(word) = chain.next_bounded(20)? {
            words.push(word);
        }
        println!("Gradual: {}", render_sentence(&words));

        // Looping generation never ends by itself
        chain.reset();
        let looped: Vec<String> = (0..30).map_while(|_| chain.next_loop().transpose()).collect::<Result<_, _>>()?;
        println!("Looped: {}", looped.join(" "));

        // Debug export next to the corpus
        let export_path = build_output_path(&path, "xml")?;
        chain.export_xml_file(&export_path)?;
        info!("{name}: graph exported to {}", export_path.display());
    }

    Ok(())
}
