use rand::Rng;

use dremelgen_core::{Document, LOCALES, Language, Links, NameEntry};

use crate::profile::CountBounds;

/// Links point at document ids in `[0, MAX_LINK_TARGET)`.
const MAX_LINK_TARGET: u64 = 1000;
const URL_HOST_LEN: usize = 10;
const URL_SUFFIX_LEN: usize = 2;

/// Builds nested documents from a random stream.
///
/// The order of draws is fixed, so the same stream state always yields the
/// same document.
#[derive(Debug, Clone, Copy)]
pub struct RecordBuilder {
    bounds: CountBounds,
    likelihood: f64,
}

impl RecordBuilder {
    /// `likelihood` is the probability that an optional field is populated.
    pub fn new(bounds: CountBounds, likelihood: f64) -> Self {
        Self { bounds, likelihood }
    }

    pub fn bounds(&self) -> CountBounds {
        self.bounds
    }

    pub fn generate_record(&self, doc_id: u64, rng: &mut impl Rng) -> Document {
        let mut document = Document::new(doc_id);

        if chance(rng, self.likelihood) {
            let links = Links {
                backward: self.link_list(rng),
                forward: self.link_list(rng),
            };
            if !links.is_empty() {
                document.links = Some(links);
            }
        }

        let names_count = draw_count(rng, self.bounds.names);
        let mut names = Vec::with_capacity(names_count);
        for _ in 0..names_count {
            let name = self.name_entry(rng);
            if !name.is_empty() {
                names.push(name);
            }
        }
        if !names.is_empty() {
            document.names = Some(names);
        }

        document
    }

    fn link_list(&self, rng: &mut impl Rng) -> Option<Vec<u64>> {
        let count = draw_count(rng, self.bounds.links);
        if count == 0 {
            return None;
        }
        Some(
            (0..count)
                .map(|_| rng.random_range(0..MAX_LINK_TARGET))
                .collect(),
        )
    }

    fn name_entry(&self, rng: &mut impl Rng) -> NameEntry {
        let languages_count = draw_count(rng, self.bounds.languages);
        let languages = if languages_count > 0 {
            Some(
                (0..languages_count)
                    .map(|_| self.language(rng))
                    .collect(),
            )
        } else {
            None
        };

        let url = chance(rng, self.likelihood).then(|| {
            format!(
                "http://{}.{}",
                random_lowercase(rng, URL_HOST_LEN),
                random_lowercase(rng, URL_SUFFIX_LEN)
            )
        });

        NameEntry { languages, url }
    }

    fn language(&self, rng: &mut impl Rng) -> Language {
        let locale = &LOCALES[rng.random_range(0..LOCALES.len())];
        Language::from_locale(locale, chance(rng, self.likelihood))
    }
}

/// Documents `0..count` built from one random stream, in order.
#[derive(Debug)]
pub struct DocumentStream<R> {
    builder: RecordBuilder,
    rng: R,
    next_id: u64,
    count: u64,
}

impl<R: Rng> DocumentStream<R> {
    pub fn new(builder: RecordBuilder, rng: R, count: u64) -> Self {
        Self {
            builder,
            rng,
            next_id: 0,
            count,
        }
    }
}

impl<R: Rng> Iterator for DocumentStream<R> {
    type Item = Document;

    fn next(&mut self) -> Option<Document> {
        if self.next_id >= self.count {
            return None;
        }
        let document = self.builder.generate_record(self.next_id, &mut self.rng);
        self.next_id += 1;
        Some(document)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.count - self.next_id).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

fn draw_count(rng: &mut impl Rng, bound: u64) -> usize {
    if bound == 0 {
        return 0;
    }
    rng.random_range(0..bound) as usize
}

fn chance(rng: &mut impl Rng, likelihood: f64) -> bool {
    rng.random::<f64>() < likelihood
}

fn random_lowercase(rng: &mut impl Rng, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'a' + rng.random_range(0..26_u8)))
        .collect()
}
