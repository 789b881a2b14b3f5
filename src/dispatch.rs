//! Strategy selection with fallback on budget overflow.

use log::{debug, info};

use crate::bdd::BddEncoder;
use crate::config::{EncoderConfig, Strategy};
use crate::constraint::PbConstraint;
use crate::db::{AuxVarManager, ClauseDatabase};
use crate::error::EncodeError;
use crate::watchdog::AdderNetworkEncoder;

/// The closed set of encoders.
#[derive(Debug, Clone)]
pub enum PbEncoder {
    AdderNetwork(AdderNetworkEncoder),
    Bdd(BddEncoder),
}

impl PbEncoder {
    /// Encoder implementing `strategy` under `config`.
    pub fn for_strategy(strategy: Strategy, config: &EncoderConfig) -> Self {
        match strategy {
            Strategy::AdderNetwork => PbEncoder::AdderNetwork(AdderNetworkEncoder::new()),
            Strategy::BddUnlimited => PbEncoder::Bdd(BddEncoder::from_config(config, false)),
            Strategy::BddLimited => PbEncoder::Bdd(BddEncoder::from_config(config, true)),
        }
    }

    pub fn encode<D>(
        &mut self,
        constraint: &PbConstraint,
        db: &mut D,
        aux: &mut dyn AuxVarManager,
    ) -> Result<(), EncodeError>
    where
        D: ClauseDatabase + ?Sized,
    {
        match self {
            PbEncoder::AdderNetwork(encoder) => encoder.encode(constraint, db, aux),
            PbEncoder::Bdd(encoder) => encoder.encode(constraint, db, aux),
        }
    }

    pub fn was_too_big(&self) -> bool {
        match self {
            PbEncoder::AdderNetwork(encoder) => encoder.was_too_big(),
            PbEncoder::Bdd(encoder) => encoder.was_too_big(),
        }
    }
}

/// Encodes constraints with the configured strategy, falling back to the
/// next one whenever a strategy reports overflow.
#[derive(Debug, Clone)]
pub struct EncodingDispatcher {
    config: EncoderConfig,
    attempts: Vec<(Strategy, bool)>,
}

impl EncodingDispatcher {
    pub fn new(config: EncoderConfig) -> Self {
        Self {
            config,
            attempts: Vec::new(),
        }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Strategies tried by the last call, each with whether it overflowed.
    pub fn attempts(&self) -> &[(Strategy, bool)] {
        &self.attempts
    }

    /// Whether any strategy of the last call overflowed.
    pub fn overflowed(&self) -> bool {
        self.attempts.iter().any(|&(_, too_big)| too_big)
    }

    /// Encodes `constraint` into `db` and returns the strategy that succeeded.
    ///
    /// Clauses of overflowing strategies never reach `db`.
    ///
    /// # Errors
    ///
    /// [`EncodeError::EncodingInfeasible`] when every strategy in
    /// [`EncoderConfig::strategy_order`] overflowed.
    pub fn encode<D>(
        &mut self,
        constraint: &PbConstraint,
        db: &mut D,
        aux: &mut dyn AuxVarManager,
    ) -> Result<Strategy, EncodeError>
    where
        D: ClauseDatabase + ?Sized,
    {
        self.attempts.clear();
        let order = self.config.strategy_order();

        for &strategy in &order {
            debug!("trying {} on {}", strategy, constraint);
            let mut encoder = PbEncoder::for_strategy(strategy, &self.config);
            match encoder.encode(constraint, db, aux) {
                Ok(()) => {
                    self.attempts.push((strategy, false));
                    return Ok(strategy);
                }
                Err(EncodeError::TooBig { clauses, limit }) => {
                    info!(
                        "{} overflowed ({} clauses, limit {}), falling back",
                        strategy, clauses, limit
                    );
                    self.attempts.push((strategy, true));
                }
                Err(e) => return Err(e),
            }
        }

        info!("all strategies overflowed: {:?}", order);
        Err(EncodeError::EncodingInfeasible { attempted: order })
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::constraint::Comparator;
    use crate::db::{Cnf, VarCounter};
    use crate::types::Lit;

    fn card_leq(n: i32, k: i64) -> PbConstraint {
        PbConstraint::cardinality((1..=n).map(Lit::from_dimacs), Comparator::Leq(k)).unwrap()
    }

    #[test]
    fn test_primary_strategy() {
        let mut dispatcher = EncodingDispatcher::new(EncoderConfig::default());
        let mut cnf = Cnf::new();
        let used = dispatcher
            .encode(&card_leq(5, 2), &mut cnf, &mut VarCounter::new(5))
            .unwrap();
        assert_eq!(used, Strategy::BddLimited);
        assert_eq!(dispatcher.attempts(), &[(Strategy::BddLimited, false)]);
        assert!(!dispatcher.overflowed());
        assert!(!cnf.is_empty());
    }

    #[test]
    fn test_fallback_to_adder_network() {
        let config = EncoderConfig::default().with_max_clauses(5);
        let mut dispatcher = EncodingDispatcher::new(config);
        let mut cnf = Cnf::new();
        let used = dispatcher
            .encode(&card_leq(10, 5), &mut cnf, &mut VarCounter::new(10))
            .unwrap();
        assert_eq!(used, Strategy::AdderNetwork);
        assert_eq!(
            dispatcher.attempts(),
            &[(Strategy::BddLimited, true), (Strategy::AdderNetwork, false)]
        );
        assert!(dispatcher.overflowed());

        // Only the adder network's clauses were delivered.
        let mut expected = Cnf::new();
        AdderNetworkEncoder::new()
            .encode(&card_leq(10, 5), &mut expected, &mut VarCounter::new(10))
            .unwrap();
        assert_eq!(cnf.len(), expected.len());
    }

    #[test]
    fn test_all_strategies_overflow() {
        let config = EncoderConfig::default()
            .with_max_clauses(1)
            .with_fallback_order([]);
        let mut dispatcher = EncodingDispatcher::new(config);
        let mut cnf = Cnf::new();
        let res = dispatcher.encode(&card_leq(6, 3), &mut cnf, &mut VarCounter::new(6));
        assert_eq!(
            res,
            Err(EncodeError::EncodingInfeasible {
                attempted: vec![Strategy::BddLimited]
            })
        );
        assert!(cnf.is_empty());
    }

    #[test]
    fn test_infeasible_fits_any_budget() {
        let config = EncoderConfig::default()
            .with_max_clauses(0)
            .with_fallback_order([]);
        let mut dispatcher = EncodingDispatcher::new(config);
        let c = PbConstraint::new([(Lit::from_dimacs(1), 2)], Comparator::Geq(3)).unwrap();
        let mut cnf = Cnf::new();
        let used = dispatcher.encode(&c, &mut cnf, &mut VarCounter::new(1)).unwrap();
        assert_eq!(used, Strategy::BddLimited);
        assert!(!dispatcher.overflowed());
        assert_eq!(cnf.len(), 1);
        assert!(cnf.has_empty_clause());
    }

    #[test]
    fn test_custom_order() {
        let config = EncoderConfig::default()
            .with_max_clauses(2)
            .with_fallback_order([Strategy::BddLimited, Strategy::BddUnlimited, Strategy::AdderNetwork]);
        let mut dispatcher = EncodingDispatcher::new(config);
        let used = dispatcher
            .encode(&card_leq(6, 3), &mut Cnf::new(), &mut VarCounter::new(6))
            .unwrap();
        assert_eq!(used, Strategy::BddUnlimited);
        assert_eq!(dispatcher.attempts().len(), 2);
    }

    #[test]
    fn test_for_strategy() {
        let config = EncoderConfig::default();
        assert!(matches!(
            PbEncoder::for_strategy(Strategy::AdderNetwork, &config),
            PbEncoder::AdderNetwork(_)
        ));
        match PbEncoder::for_strategy(Strategy::BddLimited, &config) {
            PbEncoder::Bdd(encoder) => assert!(encoder.is_limited()),
            _ => panic!("expected a bdd encoder"),
        }
        match PbEncoder::for_strategy(Strategy::BddUnlimited, &config) {
            PbEncoder::Bdd(encoder) => assert!(!encoder.is_limited()),
            _ => panic!("expected a bdd encoder"),
        }
    }
}
