//! # Integration Test Flows
//!
//! Tests that p7-02-matrix-verification and the shared-bus work together
//! correctly across the Protocol-7 pipeline.
//!
//! ## Flows Tested:
//!
//! 1. **Encoder (1) -> Matrix Verification (2)**: Submitted matrices are verified
//! 2. **Matrix Verification (2) -> Dispatch (3)**: Accepted matrices flow to dispatch
//! 3. **Cross-subsystem event publishing**: Events flow correctly through shared-bus

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::time::timeout;

    // Shared infrastructure
    use shared_bus::events::{EventFilter, EventTopic, MatrixEvent};
    use shared_bus::publisher::{EventPublisher, InMemoryEventBus};
    use shared_types::{
        MatrixId, MessageMatrix, VerificationKey, VerifiedMatrix, CHECKSUM_MODULUS, MATRIX_COLS,
        MATRIX_ROWS,
    };

    // Subsystem 2: Matrix Verification
    use p7_02_matrix_verification::{
        adapters::bus::{EventBusAdapter, MatrixVerificationBusAdapter},
        domain::entities::{BatchVerificationRequest, VerificationRequest},
        harmonic_weight, permuted_row_slot,
        ports::inbound::MatrixVerificationApi,
        ports::outbound::{DispatchError, DispatchGateway},
        service::MatrixVerificationService,
        VerificationError,
    };

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Install a test subscriber so `tracing` output is visible with
    /// `cargo test -- --nocapture`. Safe to call from every test.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }

    /// Compute the auxiliary fields for `values` under `key`, producing a
    /// matrix the verifier accepts. Mirrors the encoder in Subsystem 1.
    fn encode_matrix(values: [[u8; 5]; 7], key: VerificationKey) -> MessageMatrix {
        let residue = key.reduced();

        let mut row_verification = [0u8; MATRIX_ROWS];
        for (r, row) in values.iter().enumerate() {
            let row_sum: u64 = row.iter().map(|&b| u64::from(b)).sum();
            row_verification[permuted_row_slot(r)] = ((row_sum + residue) % 2) as u8;
        }

        let mut col_verification = [0u8; MATRIX_COLS];
        for (c, slot) in col_verification.iter_mut().enumerate() {
            let col_sum: u64 = values.iter().map(|row| u64::from(row[c])).sum();
            *slot = (col_sum % 2) as u8;
        }

        let mut checksum = 0u64;
        for (r, row) in values.iter().enumerate() {
            for (c, &bit) in row.iter().enumerate() {
                if bit != 0 {
                    checksum = (checksum + harmonic_weight(r * MATRIX_COLS + c)) % CHECKSUM_MODULUS;
                }
            }
        }

        MessageMatrix {
            values,
            row_verification,
            col_verification,
            harmonic_checksum: checksum as u8,
        }
    }

    /// Generate a random 0/1 cell grid.
    fn random_values(rng: &mut StdRng) -> [[u8; 5]; 7] {
        let mut values = [[0u8; 5]; 7];
        for row in &mut values {
            for cell in row.iter_mut() {
                *cell = rng.gen_range(0..=1);
            }
        }
        values
    }

    /// Build a verification request for random data encoded under `key`.
    fn valid_request(rng: &mut StdRng, key: VerificationKey) -> VerificationRequest {
        VerificationRequest {
            matrix_id: MatrixId::generate(),
            matrix: encode_matrix(random_values(rng), key),
            key,
        }
    }

    /// Dispatch gateway that records submitted matrices.
    #[derive(Clone)]
    struct RecordingDispatchGateway {
        submitted: Arc<Mutex<Vec<VerifiedMatrix>>>,
    }

    impl RecordingDispatchGateway {
        fn new() -> Self {
            Self {
                submitted: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait::async_trait]
    impl DispatchGateway for RecordingDispatchGateway {
        async fn submit_verified_matrix(
            &self,
            matrix: VerifiedMatrix,
        ) -> Result<(), DispatchError> {
            self.submitted.lock().unwrap().push(matrix);
            Ok(())
        }
    }

    /// Dispatch gateway that always reports a full queue.
    #[derive(Clone)]
    struct FullDispatchGateway;

    #[async_trait::async_trait]
    impl DispatchGateway for FullDispatchGateway {
        async fn submit_verified_matrix(
            &self,
            _matrix: VerifiedMatrix,
        ) -> Result<(), DispatchError> {
            Err(DispatchError::Full)
        }
    }

    // =============================================================================
    // INTEGRATION TESTS: VERIFICATION SCENARIOS
    // =============================================================================

    /// An all-zero matrix with all-zero auxiliary fields is valid under key 0.
    #[tokio::test]
    async fn test_all_zero_matrix_accepted_under_key_zero() {
        init_tracing();
        let service = MatrixVerificationService::new(RecordingDispatchGateway::new());

        let matrix = MessageMatrix::default();

        assert!(service.verify(&matrix, VerificationKey(0)));
    }

    /// The same all-zero matrix fails the row check under key 1: the key
    /// residue flips every expected row parity.
    #[tokio::test]
    async fn test_all_zero_matrix_rejected_under_key_one() {
        let service = MatrixVerificationService::new(RecordingDispatchGateway::new());

        let matrix = MessageMatrix::default();
        let result = service.verify_detailed(&matrix, VerificationKey(1));

        assert!(!result.valid);
        assert_eq!(
            result.error,
            Some(VerificationError::RowParityMismatch { row: 0, slot: 0 })
        );
    }

    /// A single set bit at (0,0) needs rv[0]=1, cv[0]=1, and checksum 0
    /// (weight of index 0 is 0) to be accepted under key 0.
    #[tokio::test]
    async fn test_single_bit_matrix_accepted() {
        let service = MatrixVerificationService::new(RecordingDispatchGateway::new());

        let mut matrix = MessageMatrix::default();
        matrix.values[0][0] = 1;
        matrix.row_verification[0] = 1;
        matrix.col_verification[0] = 1;
        matrix.harmonic_checksum = 0;

        assert!(service.verify(&matrix, VerificationKey(0)));
    }

    /// Flipping any single data bit after encoding must be detected.
    #[tokio::test]
    async fn test_any_single_bit_flip_rejected() {
        let mut rng = StdRng::seed_from_u64(0x1f_01);
        let service = MatrixVerificationService::new(RecordingDispatchGateway::new());

        let key = VerificationKey(7);
        let matrix = encode_matrix(random_values(&mut rng), key);
        assert!(service.verify(&matrix, key));

        for r in 0..MATRIX_ROWS {
            for c in 0..MATRIX_COLS {
                let mut tampered = matrix.clone();
                tampered.values[r][c] ^= 1;

                assert!(
                    !service.verify(&tampered, key),
                    "flip at ({r},{c}) went undetected"
                );
            }
        }
    }

    /// Verification depends on the key only through the parity of its
    /// residue modulo 13.
    #[tokio::test]
    async fn test_key_equivalence_classes() {
        let mut rng = StdRng::seed_from_u64(0x1f_02);
        let service = MatrixVerificationService::new(RecordingDispatchGateway::new());

        let matrix = encode_matrix(random_values(&mut rng), VerificationKey(3));

        // Residue mod 13 has the same parity as 3
        for accepted in [3u64, 16, 13_003, 5, 11] {
            assert!(
                service.verify(&matrix, VerificationKey(accepted)),
                "key {accepted} should verify"
            );
        }

        // Residue parity differs
        for rejected in [0u64, 4, 13] {
            assert!(
                !service.verify(&matrix, VerificationKey(rejected)),
                "key {rejected} should fail"
            );
        }
    }

    /// The column check never consults the key: a corrupted column parity
    /// is rejected under every key, and always as a column mismatch.
    #[tokio::test]
    async fn test_column_check_is_key_independent() {
        let mut rng = StdRng::seed_from_u64(0x1f_03);
        let service = MatrixVerificationService::new(RecordingDispatchGateway::new());

        let values = random_values(&mut rng);

        for key in 0..26u64 {
            let key = VerificationKey(key);
            let mut matrix = encode_matrix(values, key);
            matrix.col_verification[2] ^= 1;

            let result = service.verify_detailed(&matrix, key);
            assert_eq!(
                result.error,
                Some(VerificationError::ColumnParityMismatch { column: 2 })
            );
        }
    }

    /// Batch verification preserves request order and counts failures.
    #[tokio::test]
    async fn test_batch_verification_mixed() {
        let mut rng = StdRng::seed_from_u64(0x1f_04);
        let service = MatrixVerificationService::new(RecordingDispatchGateway::new());

        let key = VerificationKey(9);
        let mut requests: Vec<_> = (0..8).map(|_| valid_request(&mut rng, key)).collect();

        for _ in 0..2 {
            let mut request = valid_request(&mut rng, key);
            request.matrix.values[3][1] ^= 1;
            requests.push(request);
        }

        let result = service.batch_verify(&BatchVerificationRequest { requests });

        assert!(!result.all_valid);
        assert_eq!(result.valid_count, 8);
        assert_eq!(result.invalid_count, 2);
        assert!(result.results[..8].iter().all(|r| r.valid));
        assert!(result.results[8..].iter().all(|r| !r.valid));
    }

    // =============================================================================
    // INTEGRATION TESTS: MATRIX VERIFICATION -> EVENT BUS
    // =============================================================================

    /// A valid matrix produces a MatrixAccepted event carrying the full matrix.
    #[tokio::test]
    async fn test_verification_publishes_accepted_event() {
        init_tracing();
        let mut rng = StdRng::seed_from_u64(0x1f_05);

        let bus = Arc::new(InMemoryEventBus::new());
        let service = Arc::new(MatrixVerificationService::new(RecordingDispatchGateway::new()));
        let adapter = EventBusAdapter::new(service, bus.clone());

        // Subscribe to MatrixVerification events (simulating Dispatch subscriber)
        let mut dispatch_sub =
            bus.subscribe(EventFilter::topics(vec![EventTopic::MatrixVerification]));

        let request = valid_request(&mut rng, VerificationKey(4));
        let (result, receivers) = adapter.verify_and_publish_result(&request).await;

        assert!(result.valid);
        assert_eq!(receivers, 1, "Expected 1 subscriber to receive the event");

        let event = timeout(Duration::from_millis(100), dispatch_sub.recv())
            .await
            .expect("timeout waiting for event")
            .expect("should receive event");

        match event {
            MatrixEvent::MatrixAccepted(verified) => {
                assert_eq!(verified.matrix_id, request.matrix_id);
                assert_eq!(verified.matrix, request.matrix);
            }
            other => panic!("Expected MatrixAccepted event, got {other:?}"),
        }
    }

    /// An invalid matrix produces a MatrixRejected event naming the failed check.
    #[tokio::test]
    async fn test_verification_publishes_rejected_event() {
        let mut rng = StdRng::seed_from_u64(0x1f_06);

        let bus = Arc::new(InMemoryEventBus::new());
        let service = Arc::new(MatrixVerificationService::new(RecordingDispatchGateway::new()));
        let adapter = EventBusAdapter::new(service, bus.clone());

        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::MatrixVerification]));

        let mut request = valid_request(&mut rng, VerificationKey(4));
        request.matrix.harmonic_checksum = (request.matrix.harmonic_checksum + 1) % 13;

        let (result, receivers) = adapter.verify_and_publish_result(&request).await;

        assert!(!result.valid);
        assert_eq!(receivers, 1);

        let event = timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("timeout")
            .expect("event");

        match event {
            MatrixEvent::MatrixRejected { matrix_id, reason } => {
                assert_eq!(matrix_id, request.matrix_id);
                assert!(
                    reason.contains("Harmonic checksum mismatch"),
                    "unexpected reason: {reason}"
                );
            }
            other => panic!("Expected MatrixRejected event, got {other:?}"),
        }
    }

    /// A subscriber filtered to Dispatch events never sees verification events.
    #[tokio::test]
    async fn test_dispatch_topic_filter_excludes_verification_events() {
        let mut rng = StdRng::seed_from_u64(0x1f_07);

        let bus = Arc::new(InMemoryEventBus::new());
        let service = Arc::new(MatrixVerificationService::new(RecordingDispatchGateway::new()));
        let adapter = EventBusAdapter::new(service, bus.clone());

        let mut dispatch_only = bus.subscribe(EventFilter::topics(vec![EventTopic::Dispatch]));

        let request = valid_request(&mut rng, VerificationKey(4));
        adapter.verify_and_publish_result(&request).await;

        // Filtered out
        assert!(matches!(dispatch_only.try_recv(), Ok(None)));
    }

    // =============================================================================
    // INTEGRATION TESTS: MATRIX VERIFICATION -> DISPATCH GATEWAY
    // =============================================================================

    /// Accepted matrices reach the dispatch gateway with their ids intact.
    #[tokio::test]
    async fn test_dispatch_gateway_receives_verified_matrix() {
        let mut rng = StdRng::seed_from_u64(0x1f_08);

        let gateway = RecordingDispatchGateway::new();
        let submitted = gateway.submitted.clone();
        let service = MatrixVerificationService::new(gateway);

        let request = valid_request(&mut rng, VerificationKey(12));
        let matrix_id = request.matrix_id;

        service.verify_and_dispatch(request).await.unwrap();

        let recorded = submitted.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].matrix_id, matrix_id);
    }

    /// A full dispatch queue surfaces as DispatchFailed, not as a check failure.
    #[tokio::test]
    async fn test_full_dispatch_queue_surfaces_as_dispatch_failed() {
        let mut rng = StdRng::seed_from_u64(0x1f_09);
        let service = MatrixVerificationService::new(FullDispatchGateway);

        let request = valid_request(&mut rng, VerificationKey(12));
        let result = service.verify_and_dispatch(request).await;

        assert!(matches!(
            result,
            Err(VerificationError::DispatchFailed(_))
        ));
    }

    // =============================================================================
    // INTEGRATION TESTS: END-TO-END CHOREOGRAPHY
    // =============================================================================

    /// Full pipeline: the encoder publishes MatrixSubmitted, the verification
    /// subsystem consumes it, and the dispatch subscriber observes the verdict.
    #[tokio::test]
    async fn test_end_to_end_choreography() {
        init_tracing();
        let mut rng = StdRng::seed_from_u64(0x1f_0a);

        let bus = Arc::new(InMemoryEventBus::new());
        let service = Arc::new(MatrixVerificationService::new(RecordingDispatchGateway::new()));
        let adapter = Arc::new(EventBusAdapter::new(service, bus.clone()));

        // Subsystem 2 listens for submissions from the encoder
        let mut submissions = bus.subscribe(EventFilter::topics(vec![EventTopic::Encoding]));

        // Subsystem 3 listens for verification verdicts
        let mut verdicts = bus.subscribe(EventFilter::topics(vec![EventTopic::MatrixVerification]));

        // The shared key is distributed out of band
        let key = VerificationKey(6);

        // Encoder publishes a freshly encoded matrix
        let matrix = encode_matrix(random_values(&mut rng), key);
        let matrix_id = MatrixId::generate();
        bus.publish(MatrixEvent::MatrixSubmitted {
            matrix_id,
            matrix: matrix.clone(),
        })
        .await;

        // Verification consumes the submission
        let submission = timeout(Duration::from_millis(100), submissions.recv())
            .await
            .expect("timeout")
            .expect("event");

        let request = match submission {
            MatrixEvent::MatrixSubmitted { matrix_id, matrix } => VerificationRequest {
                matrix_id,
                matrix,
                key,
            },
            other => panic!("Expected MatrixSubmitted event, got {other:?}"),
        };

        let (result, _) = adapter.verify_and_publish_result(&request).await;
        assert!(result.valid);

        // Dispatch observes the acceptance
        let verdict = timeout(Duration::from_millis(100), verdicts.recv())
            .await
            .expect("timeout")
            .expect("event");

        match verdict {
            MatrixEvent::MatrixAccepted(verified) => {
                assert_eq!(verified.matrix_id, matrix_id);
                assert_eq!(verified.matrix, matrix);
            }
            other => panic!("Expected MatrixAccepted event, got {other:?}"),
        }
    }
}
