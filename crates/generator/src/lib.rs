//! Bibliosynth Corpus Generator
//!
//! Produces a seeded synthetic corpus:
//! 1. Draws the researcher pool (names, weighted disciplines, career starts)
//! 2. Draws each publication's authors with collaboration clustering
//! 3. Dates it between its earliest author's career start and the current year
//! 4. Picks a journal from the lead author's discipline
//! 5. Draws citations skewed toward older publications
//!
//! All randomness flows through one explicitly passed RNG.

pub mod authorship;
pub mod catalog;
pub mod citations;
pub mod names;

pub use authorship::CollaborationIndex;
pub use catalog::Catalog;

use bibliosynth_common::config::GeneratorConfig;
use bibliosynth_common::errors::Result;
use bibliosynth_common::model::{Corpus, Publication, PublicationId, Researcher, ResearcherId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{debug, info};

/// Seeded corpus generator
pub struct CorpusGenerator {
    config: GeneratorConfig,
    catalog: Catalog,
}

impl CorpusGenerator {
    /// Validate the configuration and build the catalog
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.check()?;
        let catalog = Catalog::from_config(&config)?;
        Ok(Self { config, catalog })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Generate with an RNG seeded from the configured seed
    pub fn generate(&self) -> Result<Corpus> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.generate_with(&mut rng)
    }

    /// Generate using the supplied RNG
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Corpus> {
        let started = Instant::now();

        let researchers = self.generate_researchers(rng);
        let publications = self.generate_publications(&researchers, rng);

        let corpus = Corpus::try_new(researchers, publications)?;

        info!(
            seed = self.config.seed,
            researchers = corpus.researchers.len(),
            publications = corpus.publications.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Corpus generated"
        );

        Ok(corpus)
    }

    /// Draw the researcher pool
    pub fn generate_researchers<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Researcher> {
        let current_year = self.config.current_year;
        let earliest = self.config.earliest_career_start.min(current_year);

        (1..=self.config.researcher_count)
            .map(|n| {
                let name = names::person_name(rng);
                let discipline = self.catalog.sample_discipline(rng).name.clone();
                let career_start = rng.gen_range(earliest..=current_year);
                Researcher {
                    id: ResearcherId(n as u32),
                    name,
                    discipline,
                    career_start,
                }
            })
            .collect()
    }

    /// Draw publications over an existing researcher pool
    pub fn generate_publications<R: Rng + ?Sized>(
        &self,
        researchers: &[Researcher],
        rng: &mut R,
    ) -> Vec<Publication> {
        if researchers.is_empty() {
            return Vec::new();
        }

        let current_year = self.config.current_year;
        let mut collaborations = CollaborationIndex::new(
            researchers.iter().map(|r| r.discipline.clone()).collect(),
            self.config.clustering_bias,
        );

        let mut publications = Vec::with_capacity(self.config.publication_count);
        for n in 1..=self.config.publication_count {
            let lead = rng.gen_range(0..researchers.len());
            let count = rng.gen_range(1..=self.config.max_authors);
            let authors = collaborations.select_authors(lead, count, rng);
            collaborations.record(&authors);

            let earliest_start = authors
                .iter()
                .map(|&i| researchers[i].career_start)
                .min()
                .unwrap_or(current_year)
                .min(current_year);
            let year = rng.gen_range(earliest_start..=current_year);

            let discipline = &researchers[lead].discipline;
            let journal = self
                .catalog
                .sample_journal(discipline, rng)
                .unwrap_or(discipline.as_str())
                .to_string();
            let title = names::paper_title(discipline, rng);
            let citations =
                citations::draw_citations(year, current_year, self.config.citation_rate, rng);

            debug!(
                publication = n,
                authors = authors.len(),
                year,
                citations,
                "Publication drawn"
            );

            publications.push(Publication {
                id: PublicationId(n as u32),
                title,
                authors: authors.iter().map(|&i| researchers[i].id).collect(),
                year,
                journal,
                citations,
            });
        }

        publications
    }
}

/// Generate a corpus from configuration in one call
pub fn generate(config: &GeneratorConfig) -> Result<Corpus> {
    CorpusGenerator::new(config.clone())?.generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bibliosynth_common::errors::ErrorKind;
    use bibliosynth_common::table;
    use std::collections::{HashMap, HashSet};

    fn small_config() -> GeneratorConfig {
        GeneratorConfig {
            researcher_count: 40,
            publication_count: 300,
            seed: 1234,
            current_year: 2024,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_counts_and_ids() {
        let corpus = generate(&small_config()).unwrap();
        assert_eq!(corpus.researchers.len(), 40);
        assert_eq!(corpus.publications.len(), 300);
        assert_eq!(corpus.researchers[0].id, ResearcherId(1));
        assert_eq!(corpus.publications[299].id, PublicationId(300));
    }

    #[test]
    fn test_disciplines_come_from_catalog() {
        let config = small_config();
        let corpus = generate(&config).unwrap();
        let allowed: HashSet<_> = config.disciplines.iter().map(|d| d.name.as_str()).collect();
        assert!(corpus
            .researchers
            .iter()
            .all(|r| allowed.contains(r.discipline.as_str())));
    }

    #[test]
    fn test_publication_invariants() {
        let config = small_config();
        let corpus = generate(&config).unwrap();
        let starts: HashMap<_, _> = corpus
            .researchers
            .iter()
            .map(|r| (r.id, r.career_start))
            .collect();

        for p in &corpus.publications {
            assert!(!p.authors.is_empty() && p.authors.len() <= 5);
            let unique: HashSet<_> = p.authors.iter().collect();
            assert_eq!(unique.len(), p.authors.len());

            let earliest = p.authors.iter().map(|a| starts[a]).min().unwrap();
            assert!(p.year >= earliest && p.year <= config.current_year);
        }
    }

    #[test]
    fn test_journal_matches_lead_discipline() {
        let config = small_config();
        let corpus = generate(&config).unwrap();
        for p in &corpus.publications {
            let lead = corpus.researcher(p.lead_author().unwrap()).unwrap();
            let journals = &config.discipline(&lead.discipline).unwrap().journals;
            assert!(journals.contains(&p.journal), "{} not in {}", p.journal, lead.discipline);
        }
    }

    #[test]
    fn test_same_seed_same_table() {
        let config = small_config();
        let a = table::encode_publications(&generate(&config).unwrap().publications).unwrap();
        let b = table::encode_publications(&generate(&config).unwrap().publications).unwrap();
        assert_eq!(a, b);

        let other = GeneratorConfig { seed: 99, ..config };
        let c = table::encode_publications(&generate(&other).unwrap().publications).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_clustering_produces_repeat_collaborations() {
        let corpus = generate(&GeneratorConfig {
            clustering_bias: 0.9,
            ..small_config()
        })
        .unwrap();

        let mut pairs: HashMap<(ResearcherId, ResearcherId), usize> = HashMap::new();
        for p in &corpus.publications {
            for (i, a) in p.authors.iter().enumerate() {
                for b in &p.authors[i + 1..] {
                    *pairs.entry(((*a).min(*b), (*a).max(*b))).or_default() += 1;
                }
            }
        }
        assert!(pairs.values().any(|&n| n > 1));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = generate(&GeneratorConfig {
            researcher_count: 0,
            ..small_config()
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = generate(&GeneratorConfig {
            publication_count: 0,
            ..small_config()
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = generate(&GeneratorConfig {
            disciplines: vec![],
            ..small_config()
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_single_researcher_pool() {
        let corpus = generate(&GeneratorConfig {
            researcher_count: 1,
            publication_count: 10,
            ..small_config()
        })
        .unwrap();
        assert!(corpus
            .publications
            .iter()
            .all(|p| p.authors == vec![ResearcherId(1)]));
    }
}
