use sentiment_core::{analyze, Lexicon, ScoringPolicy};

fn main() {
    let lexicon = Lexicon::new();
    let load = lexicon.load_str("good,1.0\nbad,-1.0\ngreat,2.0\nbroken line", "inline.csv");
    for skipped in &load.skipped {
        eprintln!("{:?}", miette::Report::new(skipped.clone()));
    }

    let text = "A good start, a great middle and a bad ending";
    let analysis = analyze(text, &lexicon, ScoringPolicy::PresenceAware);

    match analysis.to_json() {
        Ok(json) => println!("Scored {text:?}:\n{json}"),
        Err(e) => eprintln!("Failed to encode analysis: {e:?}"),
    }
}
