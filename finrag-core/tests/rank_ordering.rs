//! Property tests for embedding index ranking.

use std::collections::HashMap;

use async_trait::async_trait;
use finrag_core::{Document, EmbeddingIndex, EmbeddingProvider, Result, SourceKind};
use proptest::prelude::*;

const DIM: usize = 8;

/// Provider that returns canned vectors keyed by input text.
struct TableProvider {
    vectors: HashMap<String, Vec<f32>>,
}

#[async_trait]
impl EmbeddingProvider for TableProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.vectors[text].clone())
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

fn arb_vector() -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0f32, DIM)
}

/// For any corpus of vectors, ranking returns at most `top_k` results in
/// descending raw-dot-product order, and repeated calls return the identical
/// ordering (ties included).
mod prop_rank_ordering {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn descending_bounded_and_deterministic(
            vectors in proptest::collection::vec(arb_vector(), 1..20),
            query in arb_vector(),
            top_k in 1usize..25,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let document_count = vectors.len();
            let (first, second) = rt.block_on(async {
                let table: HashMap<String, Vec<f32>> = vectors
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (format!("doc {i}"), v.clone()))
                    .collect();
                let documents: Vec<Document> = (0..document_count)
                    .map(|i| Document {
                        title: format!("Doc {i}"),
                        content: format!("doc {i}"),
                        source: SourceKind::ResearchPaper,
                        date: None,
                    })
                    .collect();
                let provider = TableProvider { vectors: table };
                let index = EmbeddingIndex::build(&provider, documents).await.unwrap();
                (index.rank(&query, top_k), index.rank(&query, top_k))
            });

            prop_assert!(first.len() <= top_k);
            prop_assert!(first.len() <= document_count);

            for window in first.windows(2) {
                prop_assert!(
                    window[0].score >= window[1].score,
                    "results not in descending order: {} < {}",
                    window[0].score,
                    window[1].score,
                );
            }

            let order_a: Vec<(String, f32)> =
                first.iter().map(|r| (r.document.title.clone(), r.score)).collect();
            let order_b: Vec<(String, f32)> =
                second.iter().map(|r| (r.document.title.clone(), r.score)).collect();
            prop_assert_eq!(order_a, order_b);
        }
    }
}
