//! Data Coalescer
//!
//! Merges the per-provider benefit responses into a single view. Each
//! recognized field is collected across every response that carries it and
//! reduced with the active strategy; the three fields are reduced
//! independently of one another.

use crate::{
    error::Result,
    strategy::CoalesceStrategy,
    types::{BenefitField, CoalescedResult, ProviderResponse},
};
use tracing::debug;

/// Coalesces provider responses field by field using one strategy
pub struct DataCoalescer {
    strategy: CoalesceStrategy,
}

impl DataCoalescer {
    pub fn new(strategy: CoalesceStrategy) -> Self {
        Self { strategy }
    }

    /// Replace the active strategy
    ///
    /// The name is resolved against the same registry used at construction,
    /// with the same rejection of unknown names.
    pub fn set_strategy(&mut self, name: &str) -> Result<()> {
        self.strategy = name.parse()?;
        debug!("Strategy changed to: {}", name);
        Ok(())
    }

    pub fn strategy(&self) -> CoalesceStrategy {
        self.strategy
    }

    /// Merge provider responses into one result
    ///
    /// For each recognized field, the values of every response carrying it
    /// are collected in response order and reduced with the active strategy.
    /// A field no provider supplied is omitted from the result entirely.
    pub fn coalesce(&self, responses: &[ProviderResponse]) -> Result<CoalescedResult> {
        let mut coalesced = CoalescedResult::default();

        for field in BenefitField::ALL {
            let values: Vec<i64> = responses.iter().filter_map(|r| r.get(field)).collect();

            if values.is_empty() {
                debug!("No provider supplied {}, omitting it", field.as_str());
                continue;
            }

            debug!(
                "Coalescing {} with values {:?} using {}",
                field.as_str(),
                values,
                self.strategy.name()
            );

            let merged = self.strategy.apply(&values)?;
            coalesced.set(field, merged);
        }

        Ok(coalesced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_responses() -> Vec<ProviderResponse> {
        vec![
            ProviderResponse {
                oop_max: Some(10000),
                remaining_oop_max: Some(9000),
                copay: Some(1000),
            },
            ProviderResponse {
                oop_max: Some(20000),
                remaining_oop_max: Some(8000),
                copay: Some(5000),
            },
            ProviderResponse {
                oop_max: Some(15000),
                remaining_oop_max: Some(7000),
                copay: Some(3000),
            },
        ]
    }

    fn coalesce_with(strategy: CoalesceStrategy) -> CoalescedResult {
        DataCoalescer::new(strategy)
            .coalesce(&provider_responses())
            .unwrap()
    }

    #[test]
    fn test_coalesce_average() {
        let result = coalesce_with(CoalesceStrategy::Average);
        assert_eq!(result.oop_max, Some(15000));
        assert_eq!(result.remaining_oop_max, Some(8000));
        assert_eq!(result.copay, Some(3000));
    }

    #[test]
    fn test_coalesce_min() {
        let result = coalesce_with(CoalesceStrategy::Min);
        assert_eq!(result.oop_max, Some(10000));
        assert_eq!(result.remaining_oop_max, Some(7000));
        assert_eq!(result.copay, Some(1000));
    }

    #[test]
    fn test_coalesce_max() {
        let result = coalesce_with(CoalesceStrategy::Max);
        assert_eq!(result.oop_max, Some(20000));
        assert_eq!(result.remaining_oop_max, Some(9000));
        assert_eq!(result.copay, Some(5000));
    }

    #[test]
    fn test_coalesce_median() {
        let result = coalesce_with(CoalesceStrategy::Median);
        assert_eq!(result.oop_max, Some(15000));
        assert_eq!(result.remaining_oop_max, Some(8000));
        assert_eq!(result.copay, Some(3000));
    }

    #[test]
    fn test_fields_nobody_supplied_are_omitted() {
        let responses = vec![ProviderResponse {
            oop_max: Some(100),
            remaining_oop_max: None,
            copay: None,
        }];

        let result = DataCoalescer::new(CoalesceStrategy::Average)
            .coalesce(&responses)
            .unwrap();

        assert_eq!(result.oop_max, Some(100));
        assert_eq!(result.remaining_oop_max, None);
        assert_eq!(result.copay, None);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"oop_max": 100}));
    }

    #[test]
    fn test_partial_providers_still_produce_a_result() {
        // Two of three providers answered; the third is simply absent
        let responses = provider_responses()[..2].to_vec();

        let result = DataCoalescer::new(CoalesceStrategy::Min)
            .coalesce(&responses)
            .unwrap();

        assert_eq!(result.oop_max, Some(10000));
        assert_eq!(result.remaining_oop_max, Some(8000));
        assert_eq!(result.copay, Some(1000));
    }

    #[test]
    fn test_set_strategy_resolves_and_rejects() {
        let mut coalescer = DataCoalescer::new(CoalesceStrategy::Average);

        coalescer.set_strategy("median").unwrap();
        assert_eq!(coalescer.strategy(), CoalesceStrategy::Median);

        assert!(coalescer.set_strategy("mediam").is_err());
        // A rejected name leaves the active strategy untouched
        assert_eq!(coalescer.strategy(), CoalesceStrategy::Median);
    }
}
