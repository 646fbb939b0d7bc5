//! Keyword model - weighted terms that separate recipe pages from everything else
//!
//! The table is a precomputed artifact: terms that occur often across recipe
//! pages and rarely anywhere else, weighted by how often they showed up. It is
//! never mutated at runtime.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

/// Built-in term weights, lowercase
const BUILTIN_TERMS: &[(&str, u32)] = &[
    ("tablespoons", 4852),
    ("tablespoon", 3127),
    ("teaspoons", 3941),
    ("teaspoon", 3512),
    ("tbsp", 2786),
    ("tsp", 2690),
    ("cups", 3380),
    ("ounces", 1264),
    ("grams", 1105),
    ("pinch", 872),
    ("dash", 388),
    ("ingredients", 4410),
    ("instructions", 1532),
    ("preheat", 1987),
    ("oven", 2834),
    ("degrees", 1146),
    ("bake", 1812),
    ("baked", 1121),
    ("baking", 2265),
    ("roast", 958),
    ("roasted", 874),
    ("simmer", 1402),
    ("boil", 956),
    ("saute", 611),
    ("sauté", 574),
    ("whisk", 1687),
    ("stir", 2154),
    ("stirring", 903),
    ("fold", 612),
    ("knead", 437),
    ("drizzle", 706),
    ("marinate", 402),
    ("chop", 519),
    ("chopped", 2410),
    ("minced", 1794),
    ("diced", 1525),
    ("sliced", 1311),
    ("grated", 867),
    ("shredded", 742),
    ("softened", 698),
    ("melted", 1036),
    ("divided", 744),
    ("garnish", 689),
    ("skillet", 1288),
    ("saucepan", 1094),
    ("sheet", 284),
    ("bowl", 1903),
    ("whisked", 372),
    ("flour", 2976),
    ("sugar", 2841),
    ("butter", 3002),
    ("unsalted", 1367),
    ("salt", 3650),
    ("pepper", 2230),
    ("garlic", 2498),
    ("onion", 1874),
    ("olive", 1622),
    ("oil", 2611),
    ("eggs", 1783),
    ("yolks", 531),
    ("vanilla", 1459),
    ("cinnamon", 1022),
    ("cumin", 704),
    ("paprika", 663),
    ("oregano", 527),
    ("parsley", 884),
    ("cilantro", 793),
    ("basil", 761),
    ("thyme", 692),
    ("ginger", 815),
    ("lemon", 1702),
    ("zest", 749),
    ("parmesan", 802),
    ("mozzarella", 533),
    ("cheddar", 518),
    ("buttermilk", 476),
    ("yeast", 538),
    ("dough", 1366),
    ("batter", 1048),
    ("broth", 1179),
    ("stock", 402),
    ("cornstarch", 509),
    ("confectioners'", 447),
    ("powdered", 594),
    ("brown", 377),
    ("servings", 2195),
    ("serves", 734),
    ("yield", 651),
    ("prep", 1918),
    ("cook", 2367),
    ("cooking", 1488),
    ("minutes", 3795),
    ("calories", 1342),
    ("carbohydrates", 802),
    ("sodium", 861),
    ("cholesterol", 626),
    ("nutrition", 978),
    ("recipe", 3260),
    ("recipes", 2118),
    ("delicious", 806),
    ("tender", 649),
    ("golden", 811),
    ("crispy", 574),
    ("refrigerate", 458),
    ("leftovers", 391),
];

static BUILTIN: Lazy<KeywordModel> = Lazy::new(|| {
    KeywordModel::new(BUILTIN_TERMS.iter().copied()).expect("Invalid built-in keyword pattern")
});

/// Immutable term -> weight mapping plus the single pattern that finds any term
#[derive(Debug, Clone)]
pub struct KeywordModel {
    weights: HashMap<String, u32>,
    /// `None` for an empty model, which matches nothing
    pattern: Option<Regex>,
}

impl KeywordModel {
    /// Build a model from `(term, weight)` pairs. Terms are lowercased; a later
    /// duplicate replaces an earlier one.
    pub fn new<I, S>(terms: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let weights: HashMap<String, u32> = terms
            .into_iter()
            .map(|(term, weight)| (term.as_ref().trim().to_lowercase(), weight))
            .filter(|(term, _)| !term.is_empty())
            .collect();

        // Longest first, so a term never loses to one of its own prefixes
        let mut ordered: Vec<&str> = weights.keys().map(String::as_str).collect();
        ordered.sort_by(|a, b| {
            b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b))
        });

        let pattern = if ordered.is_empty() {
            None
        } else {
            let alternation = ordered
                .iter()
                .map(|term| regex::escape(term))
                .collect::<Vec<_>>()
                .join("|");
            Some(
                RegexBuilder::new(&format!("(?:{})", alternation))
                    .case_insensitive(true)
                    .build()?,
            )
        };

        Ok(Self { weights, pattern })
    }

    /// The compiled-in model
    pub fn builtin() -> &'static KeywordModel {
        &BUILTIN
    }

    /// Weight of a term, case-insensitive
    pub fn weight(&self, term: &str) -> Option<u32> {
        self.weights.get(&term.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Every whole-word occurrence of a model term in `text`, in order.
    ///
    /// A match counts only when the characters on either side are not
    /// letters, so "salt" is found in "salt," and "(salt)" but not in
    /// "saltwater" or "basalt". Terms carrying punctuation such as
    /// "confectioners'" follow the same rule on their outer edges.
    pub fn find_terms<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pattern
            .iter()
            .flat_map(move |re| re.find_iter(text))
            .filter(move |m| is_word_bounded(text, m.start(), m.end()))
            .map(|m| m.as_str())
    }
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphabetic) && !after.is_some_and(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(terms: &[(&str, u32)]) -> KeywordModel {
        KeywordModel::new(terms.iter().copied()).unwrap()
    }

    #[test]
    fn test_builtin_model_loads() {
        let model = KeywordModel::builtin();
        assert!(model.len() > 100);
        assert_eq!(model.weight("Tablespoons"), Some(4852));
        assert_eq!(model.weight("confectioners'"), Some(447));
    }

    #[test]
    fn test_builtin_terms_are_lowercase_and_positive() {
        for (term, weight) in BUILTIN_TERMS {
            assert_eq!(*term, term.to_lowercase());
            assert!(*weight > 0, "{} has no weight", term);
        }
    }

    #[test]
    fn test_whole_word_only() {
        let model = model(&[("salt", 10), ("oil", 5)]);
        let found: Vec<&str> = model
            .find_terms("Salt the saltwater, then boil the oil (salt).")
            .collect();
        assert_eq!(found, vec!["Salt", "oil", "salt"]);
    }

    #[test]
    fn test_prefers_longest_term() {
        let model = model(&[("cup", 1), ("cups", 2)]);
        let found: Vec<&str> = model.find_terms("2 cups flour, 1 cup milk").collect();
        assert_eq!(found, vec!["cups", "cup"]);
    }

    #[test]
    fn test_apostrophe_terms() {
        let model = model(&[("confectioners'", 3)]);
        let found: Vec<&str> = model.find_terms("1 cup confectioners' sugar").collect();
        assert_eq!(found, vec!["confectioners'"]);
        assert_eq!(model.find_terms("confectioners'x").count(), 0);
    }

    #[test]
    fn test_digits_and_punctuation_are_boundaries() {
        let model = model(&[("tbsp", 1)]);
        assert_eq!(model.find_terms("2tbsp, 3-tbsp").count(), 2);
    }

    #[test]
    fn test_empty_model_matches_nothing() {
        let model = model(&[]);
        assert!(model.is_empty());
        assert_eq!(model.find_terms("anything at all").count(), 0);
    }
}
