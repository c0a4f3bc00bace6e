//! Engine Resolver
//!
//! Turns an [`EngineRequest`] into a complete [`EngineSelection`].
//!
//! # Resolution Rules
//!
//! Explicit engines in the request always win. When neither `computing` nor
//! `federation` is given, the legacy selectors pick a default pair:
//!
//! | Backend          | Work Mode  | Computing   | Federation  |
//! |------------------|------------|-------------|-------------|
//! | `EGGROLL`        | `CLUSTER`  | EGGROLL     | EGGROLL     |
//! | `EGGROLL`        | other      | STANDALONE  | STANDALONE  |
//! | `SPARK_RABBITMQ` | any        | SPARK       | RABBITMQ    |
//! | `SPARK_PULSAR`   | any        | SPARK       | PULSAR      |
//!
//! Storage and federation still unset afterwards come from the relationship
//! table defaults of the resolved computing engine. `federated_mode` is
//! SINGLE for STANDALONE federation and MULTIPLE otherwise.
//!
//! When only `computing` is given, the pair rule is skipped entirely and
//! federation comes from the table alone.

use tracing::debug;

use crate::config_file::EngineRequest;
use crate::engine::relationship::RelationshipTable;
use crate::error::{EngineError, Result};
use crate::types::{
    Backend, ComputingEngine, EngineSelection, FederatedMode, FederationEngine, Selector,
    WorkMode,
};

/// Resolve a request into a complete engine selection.
///
/// # Errors
///
/// - [`EngineError::MissingInput`]: no computing engine and a selector is unset
/// - [`EngineError::UnsupportedCombination`]: selectors match no default pair
///   (including unknown integer codes)
/// - [`EngineError::UnresolvedComputing`]: federation given without computing
/// - [`EngineError::MissingRelationship`]: the table lacks the computing engine
pub fn resolve_engines(
    request: &EngineRequest,
    table: &RelationshipTable,
) -> Result<EngineSelection> {
    let mut computing = request.computing;
    let mut federation = request.federation;

    if computing.is_none() && (request.work_mode.is_none() || request.backend.is_none()) {
        return Err(EngineError::MissingInput);
    }

    if computing.is_none() && federation.is_none() {
        let (Some(work_mode), Some(backend)) = (request.work_mode, request.backend) else {
            return Err(EngineError::MissingInput);
        };
        let (default_computing, default_federation) = default_engines(work_mode, backend)?;
        debug!(
            %work_mode,
            %backend,
            computing = %default_computing,
            federation = %default_federation,
            "Selected default engines from legacy selectors"
        );
        computing = Some(default_computing);
        federation = Some(default_federation);
    }

    let computing = computing.ok_or(EngineError::UnresolvedComputing)?;

    let storage = match request.storage {
        Some(storage) => storage,
        None => {
            let storage = table.default_storage(computing)?;
            debug!(%computing, %storage, "Using default storage engine");
            storage
        }
    };

    let federation = match federation {
        Some(federation) => federation,
        None => {
            let federation = table.default_federation(computing)?;
            debug!(%computing, %federation, "Using default federation engine");
            federation
        }
    };

    let federated_mode = request
        .federated_mode
        .unwrap_or_else(|| FederatedMode::for_federation(federation));

    Ok(EngineSelection {
        computing,
        federation,
        storage,
        federated_mode,
    })
}

/// Default (computing, federation) pair for the legacy selectors.
///
/// Both selectors are normalized first; an unknown integer code is reported
/// as an unsupported combination.
pub fn default_engines(
    work_mode: Selector<WorkMode>,
    backend: Selector<Backend>,
) -> Result<(ComputingEngine, FederationEngine)> {
    let unsupported = || EngineError::unsupported(work_mode, backend);

    let mode = work_mode.normalize().ok_or_else(unsupported)?;
    let bundle = backend.normalize().ok_or_else(unsupported)?;

    match bundle {
        Backend::Eggroll if mode.is_cluster() => {
            Ok((ComputingEngine::Eggroll, FederationEngine::Eggroll))
        }
        Backend::Eggroll => Ok((ComputingEngine::Standalone, FederationEngine::Standalone)),
        Backend::SparkRabbitmq => Ok((ComputingEngine::Spark, FederationEngine::Rabbitmq)),
        Backend::SparkPulsar => Ok((ComputingEngine::Spark, FederationEngine::Pulsar)),
        Backend::LinkisSparkRabbitmq => Err(unsupported()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StorageEngine;

    fn table() -> RelationshipTable {
        RelationshipTable::builtin()
    }

    fn legacy(work_mode: WorkMode, backend: Backend) -> EngineRequest {
        EngineRequest::empty().work_mode(work_mode).backend(backend)
    }

    #[test]
    fn test_default_request_is_standalone() {
        let selection = resolve_engines(&EngineRequest::default(), &table()).unwrap();
        assert_eq!(selection.computing, ComputingEngine::Standalone);
        assert_eq!(selection.federation, FederationEngine::Standalone);
        assert_eq!(selection.storage, StorageEngine::Standalone);
        assert_eq!(selection.federated_mode, FederatedMode::Single);
    }

    #[test]
    fn test_eggroll_cluster() {
        let selection =
            resolve_engines(&legacy(WorkMode::Cluster, Backend::Eggroll), &table()).unwrap();
        assert_eq!(selection.computing, ComputingEngine::Eggroll);
        assert_eq!(selection.federation, FederationEngine::Eggroll);
        assert_eq!(selection.storage, StorageEngine::Eggroll);
        assert_eq!(selection.federated_mode, FederatedMode::Multiple);
    }

    #[test]
    fn test_spark_rabbitmq_ignores_work_mode() {
        for mode in [WorkMode::Standalone, WorkMode::Cluster] {
            let selection =
                resolve_engines(&legacy(mode, Backend::SparkRabbitmq), &table()).unwrap();
            assert_eq!(selection.computing, ComputingEngine::Spark);
            assert_eq!(selection.federation, FederationEngine::Rabbitmq);
            assert_eq!(selection.storage, StorageEngine::Hdfs);
            assert_eq!(selection.federated_mode, FederatedMode::Multiple);
        }
    }

    #[test]
    fn test_spark_pulsar() {
        let selection =
            resolve_engines(&legacy(WorkMode::Cluster, Backend::SparkPulsar), &table()).unwrap();
        assert_eq!(selection.computing, ComputingEngine::Spark);
        assert_eq!(selection.federation, FederationEngine::Pulsar);
        assert_eq!(selection.storage, StorageEngine::Hdfs);
    }

    #[test]
    fn test_linkis_backend_is_unsupported() {
        let err = resolve_engines(
            &legacy(WorkMode::Cluster, Backend::LinkisSparkRabbitmq),
            &table(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "unable to find default engines by work_mode: CLUSTER backend: LINKIS_SPARK_RABBITMQ"
        );
    }

    #[test]
    fn test_unknown_backend_code_is_unsupported() {
        let request = EngineRequest::empty()
            .work_mode(WorkMode::Cluster)
            .backend(Selector::Code(17));
        let err = resolve_engines(&request, &table()).unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedCombination { .. }));
        assert!(err.to_string().ends_with("backend: 17"));
    }

    #[test]
    fn test_unknown_work_mode_code_is_unsupported() {
        let request = EngineRequest::empty()
            .work_mode(Selector::Code(5))
            .backend(Backend::Eggroll);
        assert!(matches!(
            resolve_engines(&request, &table()),
            Err(EngineError::UnsupportedCombination { .. })
        ));
    }

    #[test]
    fn test_missing_everything() {
        let err = resolve_engines(&EngineRequest::empty(), &table()).unwrap_err();
        assert!(matches!(err, EngineError::MissingInput));
    }

    #[test]
    fn test_missing_one_selector() {
        let request = EngineRequest::empty().work_mode(WorkMode::Cluster);
        assert!(matches!(
            resolve_engines(&request, &table()),
            Err(EngineError::MissingInput)
        ));

        let request = EngineRequest::empty().backend(Backend::SparkPulsar);
        assert!(matches!(
            resolve_engines(&request, &table()),
            Err(EngineError::MissingInput)
        ));
    }

    #[test]
    fn test_computing_without_selectors() {
        let request = EngineRequest::empty().computing(ComputingEngine::Spark);
        let selection = resolve_engines(&request, &table()).unwrap();
        assert_eq!(selection.computing, ComputingEngine::Spark);
        assert_eq!(selection.federation, FederationEngine::Rabbitmq);
        assert_eq!(selection.storage, StorageEngine::Hdfs);
        assert_eq!(selection.federated_mode, FederatedMode::Multiple);
    }

    #[test]
    fn test_partial_override_skips_pair_rule() {
        // SPARK_PULSAR would pick PULSAR, but an explicit computing engine
        // means federation comes from the table instead.
        let request = legacy(WorkMode::Cluster, Backend::SparkPulsar)
            .computing(ComputingEngine::Spark);
        let selection = resolve_engines(&request, &table()).unwrap();
        assert_eq!(selection.federation, FederationEngine::Rabbitmq);
    }

    #[test]
    fn test_explicit_computing_with_unsupported_backend() {
        // Selectors are never consulted when computing is explicit
        let request = EngineRequest::empty()
            .work_mode(Selector::Code(99))
            .backend(Selector::Code(99))
            .computing(ComputingEngine::Eggroll);
        let selection = resolve_engines(&request, &table()).unwrap();
        assert_eq!(selection.computing, ComputingEngine::Eggroll);
    }

    #[test]
    fn test_federation_without_computing() {
        let request = legacy(WorkMode::Cluster, Backend::Eggroll)
            .federation(FederationEngine::Pulsar);
        assert!(matches!(
            resolve_engines(&request, &table()),
            Err(EngineError::UnresolvedComputing)
        ));
    }

    #[test]
    fn test_explicit_overrides_win() {
        let request = legacy(WorkMode::Standalone, Backend::Eggroll)
            .computing(ComputingEngine::Spark)
            .federation(FederationEngine::Pulsar)
            .storage(StorageEngine::Localfs)
            .federated_mode(FederatedMode::Single);
        let selection = resolve_engines(&request, &table()).unwrap();
        assert_eq!(selection.computing, ComputingEngine::Spark);
        assert_eq!(selection.federation, FederationEngine::Pulsar);
        assert_eq!(selection.storage, StorageEngine::Localfs);
        assert_eq!(selection.federated_mode, FederatedMode::Single);
    }

    #[test]
    fn test_storage_override_keeps_pair_rule() {
        let request = legacy(WorkMode::Cluster, Backend::SparkPulsar).storage(StorageEngine::Hive);
        let selection = resolve_engines(&request, &table()).unwrap();
        assert_eq!(selection.computing, ComputingEngine::Spark);
        assert_eq!(selection.federation, FederationEngine::Pulsar);
        assert_eq!(selection.storage, StorageEngine::Hive);
    }

    #[test]
    fn test_missing_relationship_propagates() {
        let request = legacy(WorkMode::Cluster, Backend::Eggroll);
        let err = resolve_engines(&request, &RelationshipTable::new()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingRelationship {
                computing: ComputingEngine::Eggroll,
                ..
            }
        ));
    }

    #[test]
    fn test_explicit_storage_and_federation_need_no_table() {
        let request = EngineRequest::empty()
            .computing(ComputingEngine::Eggroll)
            .federation(FederationEngine::Eggroll)
            .storage(StorageEngine::Eggroll);
        let selection = resolve_engines(&request, &RelationshipTable::new()).unwrap();
        assert_eq!(selection.federated_mode, FederatedMode::Multiple);
    }

    #[test]
    fn test_integer_codes_match_members() {
        let by_code = EngineRequest::empty()
            .work_mode(Selector::Code(1))
            .backend(Selector::Code(0));
        let by_member = legacy(WorkMode::Cluster, Backend::Eggroll);
        assert_eq!(
            resolve_engines(&by_code, &table()).unwrap(),
            resolve_engines(&by_member, &table()).unwrap()
        );
    }

    #[test]
    fn test_default_engines_with_codes() {
        assert_eq!(
            default_engines(Selector::Code(0), Selector::Code(0)).unwrap(),
            (ComputingEngine::Standalone, FederationEngine::Standalone)
        );
        assert_eq!(
            default_engines(Selector::Code(1), Selector::Code(2)).unwrap(),
            (ComputingEngine::Spark, FederationEngine::Pulsar)
        );
        let err = default_engines(Selector::Code(0), Selector::Code(8)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unable to find default engines by work_mode: STANDALONE backend: 8"
        );
    }

    #[test]
    fn test_unknown_code_message_matches_resolve() {
        let request = EngineRequest::empty()
            .work_mode(Selector::Code(5))
            .backend(Selector::Code(0));
        let from_resolve = resolve_engines(&request, &table()).unwrap_err();
        let from_pair = default_engines(Selector::Code(5), Selector::Code(0)).unwrap_err();
        assert_eq!(from_resolve.to_string(), from_pair.to_string());
        assert_eq!(
            from_pair.to_string(),
            "unable to find default engines by work_mode: 5 backend: EGGROLL"
        );
    }
}
