//! Filter evaluator over in-memory pet lists.

use crate::model::pet::Pet;

const DEFAULT_MIN_AGE: u32 = 0;
const DEFAULT_MAX_AGE: u32 = 100;

/// Inclusive age bounds. An inverted range (`min > max`) matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

impl AgeRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Builds a range from raw text inputs.
    ///
    /// A bound that is blank, unparsable or zero falls back to `0` (min) or
    /// `100` (max); a zero max therefore widens to the default instead of
    /// excluding every pet. Fractional bounds are accepted and tightened to
    /// the whole ages they admit (`2.5..=7.5` behaves as `3..=7`). A negative
    /// max yields a range that matches nothing.
    pub fn from_inputs(min_text: &str, max_text: &str) -> Self {
        let min = parse_bound(min_text).map_or(DEFAULT_MIN_AGE, |value| value.ceil() as u32);
        match parse_bound(max_text) {
            None => Self::new(min, DEFAULT_MAX_AGE),
            Some(value) if value < 0.0 => Self::new(1, 0),
            Some(value) => Self::new(min, value.floor() as u32),
        }
    }

    pub fn contains(&self, age: u32) -> bool {
        age >= self.min && age <= self.max
    }
}

impl Default for AgeRange {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_AGE, DEFAULT_MAX_AGE)
    }
}

/// Combined filter criteria; all must hold for a pet to be visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetFilter {
    /// Case-insensitive name substring; empty matches all.
    pub query: String,
    pub age_range: AgeRange,
    /// When set, only pets with a non-empty description pass.
    pub require_description: bool,
}

impl PetFilter {
    pub fn apply<'a>(&self, pets: &'a [Pet]) -> Vec<&'a Pet> {
        evaluate(pets, &self.query, self.age_range, self.require_description)
    }

    pub fn matches(&self, pet: &Pet) -> bool {
        matches_name(pet, &self.query.to_lowercase())
            && self.age_range.contains(pet.age)
            && (!self.require_description || pet.has_description())
    }
}

/// Returns pets satisfying name, age and description criteria, in order.
pub fn evaluate<'a>(
    pets: &'a [Pet],
    query: &str,
    age_range: AgeRange,
    require_description: bool,
) -> Vec<&'a Pet> {
    let needle = query.to_lowercase();
    pets.iter()
        .filter(|pet| matches_name(pet, &needle))
        .filter(|pet| age_range.contains(pet.age))
        .filter(|pet| !require_description || pet.has_description())
        .collect()
}

/// Returns pets whose name contains `query`, ignoring case.
pub fn search_by_name<'a>(pets: &'a [Pet], query: &str) -> Vec<&'a Pet> {
    let needle = query.to_lowercase();
    pets.iter().filter(|pet| matches_name(pet, &needle)).collect()
}

fn matches_name(pet: &Pet, lowered_query: &str) -> bool {
    lowered_query.is_empty() || pet.name.to_lowercase().contains(lowered_query)
}

// Float-to-int `as` saturates, so negative mins land on 0 and huge bounds on u32::MAX.
fn parse_bound(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| !value.is_nan() && *value != 0.0)
}

#[cfg(test)]
mod tests {
    use super::{evaluate, AgeRange, PetFilter};
    use crate::model::pet::Pet;

    fn pet(name: &str, age: u32, description: Option<&str>) -> Pet {
        let mut pet = Pet::new(name, age);
        pet.description = description.map(str::to_string);
        pet
    }

    #[test]
    fn age_range_is_inclusive() {
        let range = AgeRange::new(3, 5);
        assert!(range.contains(3));
        assert!(range.contains(5));
        assert!(!range.contains(2));
        assert!(!range.contains(6));
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let pets = vec![pet("Rex", 3, None)];
        assert!(evaluate(&pets, "", AgeRange::new(5, 1), false).is_empty());
    }

    #[test]
    fn from_inputs_falls_back_on_garbage() {
        assert_eq!(AgeRange::from_inputs("abc", ""), AgeRange::new(0, 100));
        assert_eq!(AgeRange::from_inputs(" 2 ", "9"), AgeRange::new(2, 9));
    }

    #[test]
    fn from_inputs_treats_zero_as_unset() {
        assert_eq!(AgeRange::from_inputs("0", "0"), AgeRange::new(0, 100));
        assert_eq!(AgeRange::from_inputs("-4", "0.0"), AgeRange::new(0, 100));
    }

    #[test]
    fn from_inputs_accepts_fractional_bounds() {
        let pets = vec![pet("A", 2, None), pet("B", 3, None), pet("C", 7, None), pet("D", 8, None)];
        let range = AgeRange::from_inputs("2.5", "7.5");
        assert_eq!(range, AgeRange::new(3, 7));

        let ages: Vec<u32> = evaluate(&pets, "", range, false)
            .into_iter()
            .map(|pet| pet.age)
            .collect();
        assert_eq!(ages, vec![3, 7]);
    }

    #[test]
    fn negative_max_matches_nothing() {
        let pets = vec![pet("Rex", 3, None)];
        let range = AgeRange::from_inputs("", "-1");
        assert!(evaluate(&pets, "", range, false).is_empty());
    }

    #[test]
    fn matches_agrees_with_apply() {
        let pets = vec![pet("Rex", 3, Some("loud")), pet("Mia", 10, None)];
        let filter = PetFilter {
            query: "RE".to_string(),
            ..PetFilter::default()
        };
        let visible = filter.apply(&pets);
        assert_eq!(visible.len(), 1);
        assert!(filter.matches(visible[0]));
        assert!(!filter.matches(&pets[1]));
    }
}
