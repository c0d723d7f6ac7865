//! Name and title vocabularies

use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "Aisha", "Alejandro", "Amara", "Anders", "Beatriz", "Chen", "Daniel", "Dmitri",
    "Elena", "Emeka", "Farah", "Gabriel", "Hana", "Ibrahim", "Ingrid", "Jae-won",
    "Julia", "Kofi", "Laila", "Lucas", "Maya", "Mateo", "Nadia", "Noah",
    "Olga", "Priya", "Rafael", "Sakura", "Samuel", "Sofia", "Tariq", "Yusuf",
];

const LAST_NAMES: &[&str] = &[
    "Abebe", "Andersen", "Bianchi", "Castillo", "Dubois", "Eriksson", "Fernandes", "Garcia",
    "Haddad", "Ivanova", "Jensen", "Kim", "Kowalski", "Li", "Mensah", "Moreau",
    "Nakamura", "Novak", "Okafor", "Patel", "Quispe", "Rossi", "Schmidt", "Silva",
    "Tanaka", "Umarov", "Van Dijk", "Wang", "Weber", "Yilmaz", "Zhang", "Zielinski",
];

const ADJECTIVES: &[&str] = &[
    "Scalable", "Robust", "Emergent", "Adaptive", "Nonlinear", "Stochastic",
    "Hierarchical", "Quantitative", "Comparative", "Efficient", "Novel", "Unified",
];

// Suffixes carry their own leading separator
const SUFFIXES: &[&str] = &[
    " in Practice", " Revisited", " at Scale", " Under Uncertainty", " and Its Applications",
    " from First Principles", ": A Systematic Review", " Across Populations", " with Sparse Data",
];

const DEFAULT_TOPICS: &[&str] = &["Methods", "Models", "Measurements", "Frameworks"];

/// Topic words keyed by discipline name; unknown disciplines fall back to generic topics
fn topics(discipline: &str) -> &'static [&'static str] {
    match discipline {
        "Physics" => &["Quantum Transport", "Dark Matter Halos", "Spin Chains", "Plasma Instabilities"],
        "Biology" => &["Gene Regulation", "Protein Folding", "Microbial Communities", "Cell Signalling"],
        "Chemistry" => &["Catalytic Pathways", "Polymer Networks", "Reaction Kinetics", "Molecular Sieves"],
        "Computer Science" => &["Graph Algorithms", "Type Systems", "Distributed Consensus", "Neural Networks"],
        "Mathematics" => &["Prime Gaps", "Elliptic Curves", "Random Matrices", "Knot Invariants"],
        "Economics" => &["Labor Markets", "Monetary Policy", "Auction Design", "Trade Networks"],
        _ => DEFAULT_TOPICS,
    }
}

fn pick<'a, R: Rng + ?Sized>(words: &'a [&'a str], rng: &mut R) -> &'a str {
    words.choose(rng).copied().unwrap_or_default()
}

/// A plausible full name
pub fn person_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(FIRST_NAMES, rng), pick(LAST_NAMES, rng))
}

/// A discipline-flavoured paper title
pub fn paper_title<R: Rng + ?Sized>(discipline: &str, rng: &mut R) -> String {
    let adjective = pick(ADJECTIVES, rng);
    let topic = pick(topics(discipline), rng);
    let suffix = pick(SUFFIXES, rng);
    format!("{adjective} {topic}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_person_name_has_two_parts() {
        let mut rng = StdRng::seed_from_u64(3);
        let name = person_name(&mut rng);
        let first = name.split(' ').next().unwrap();
        assert!(FIRST_NAMES.contains(&first));
    }

    #[test]
    fn test_title_uses_discipline_topic() {
        let mut rng = StdRng::seed_from_u64(5);
        let title = paper_title("Mathematics", &mut rng);
        assert!(topics("Mathematics").iter().any(|t| title.contains(t)));
    }

    #[test]
    fn test_unknown_discipline_falls_back() {
        let mut rng = StdRng::seed_from_u64(5);
        let title = paper_title("Astrology", &mut rng);
        assert!(DEFAULT_TOPICS.iter().any(|t| title.contains(t)));
    }
}
