use geoset_plugins::Registry;

use crate::terminal::print;

pub fn converters(registry: &Registry, quiet: bool) {
    print::header("input converters", quiet);
    for row in rows(registry.input_types()) {
        println!("{row}");
    }

    print::header("output converters", quiet);
    for row in rows(registry.output_types()) {
        println!("{row}");
    }
}

fn rows(types: impl Iterator<Item = (&'static str, &'static str)>) -> Vec<String> {
    types.map(|(name, description)| print::aligned_row(name, description)).collect()
}
