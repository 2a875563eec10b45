use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gazetteer_toponym_extractor::{Extractor, ExtractorBuilder, Gazetteer, Vocabulary};
use rand::distributions::Alphanumeric;
use rand::rngs::ThreadRng;
use rand::seq::index::sample;
use rand::{thread_rng, Rng};

/// Function generating a random lower-cased word of various length
fn generate_random_word(rng: &mut ThreadRng) -> String {
    let n_char = rng.gen_range(3..8);
    rng.sample_iter(&Alphanumeric)
        .take(n_char)
        .map(|c| char::from(c).to_ascii_lowercase())
        .collect()
}

/// Random phrase generator drawing from a fixed pool of words, so that the generated location
/// names share words and the generated texts actually mention some of them
struct RandomPhraseGenerator {
    unique_words: Vec<String>,
    rng: ThreadRng,
}

impl RandomPhraseGenerator {
    fn new(n_unique_words: usize) -> RandomPhraseGenerator {
        let mut rng = thread_rng();
        let unique_words = (0..n_unique_words)
            .map(|_| generate_random_word(&mut rng))
            .collect();
        RandomPhraseGenerator { unique_words, rng }
    }

    fn generate(&mut self, max_words: usize) -> String {
        let n_words = self.rng.gen_range(1..=max_words);
        sample(&mut self.rng, self.unique_words.len(), n_words)
            .into_iter()
            .map(|idx| self.unique_words[idx].as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn random_gazetteer(generator: &mut RandomPhraseGenerator, n_names: usize) -> Gazetteer {
    let mut gazetteer = Gazetteer::default();
    for id in 0..n_names {
        let name = generator.generate(4);
        gazetteer.add(&name, id as u64);
    }
    gazetteer
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut generator = RandomPhraseGenerator::new(5000);
    let gazetteer = random_gazetteer(&mut generator, 50000);
    let mut stop_words_generator = RandomPhraseGenerator::new(500);
    let vocabulary: Vocabulary = stop_words_generator.unique_words.iter().collect();

    c.bench_function("Build environment from random gazetteer", |b| {
        b.iter(|| {
            ExtractorBuilder::default()
                .gazetteer(gazetteer.clone())
                .vocabulary(vocabulary.clone())
                .build()
                .unwrap()
        })
    });

    let environment = ExtractorBuilder::default()
        .gazetteer(gazetteer)
        .vocabulary(vocabulary)
        .build()
        .unwrap();
    let extractor = Extractor::new(environment);

    c.bench_function("Extract from random text", |b| {
        b.iter(|| {
            let text = format!(
                "{} {} {}",
                stop_words_generator.generate(3),
                generator.generate(6),
                stop_words_generator.generate(3)
            );
            extractor.extract(black_box(&text)).unwrap()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
