// ==========================================
// 酒店维护导入 - 批量写入器
// ==========================================
// 职责: 将转换后的记录分批交给持久化协作方
// 特性: 批内并发 / 单项重试（线性退避）/ 进度回调 / 协作式取消
// 取消检查点: 每批开始前、重试等待中、批间等待中
// ==========================================

use crate::config::ImportConfigReader;
use crate::importer::importer_trait::RecordSink;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

// ==========================================
// BatchOptions - 批处理选项
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    pub batch_size: usize,
    pub max_retries: u32,
    pub retry_delay: Duration, // 第 n 次失败后等待 retry_delay * n
    pub batch_delay: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            batch_size: 10,
            max_retries: 3,
            retry_delay: Duration::from_millis(1000),
            batch_delay: Duration::from_millis(100),
        }
    }
}

impl BatchOptions {
    /// 从配置读取（缺省值同 Default）
    pub fn from_config(config: &impl ImportConfigReader) -> Self {
        Self {
            batch_size: config.get_batch_size().max(1),
            max_retries: config.get_max_retries().max(1),
            retry_delay: Duration::from_millis(config.get_retry_delay_ms()),
            batch_delay: Duration::from_millis(config.get_batch_delay_ms()),
        }
    }
}

// ==========================================
// 进度与结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchProgress {
    pub total: usize,
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub percentage: u32,
    pub current_batch: usize,
    pub total_batches: usize,
    pub estimated_time_remaining_ms: u64,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSuccess {
    pub index: usize,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub index: usize,
    pub error: String,
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub average_ms_per_item: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub succeeded: Vec<BatchSuccess>,
    pub failed: Vec<BatchFailure>,
    pub stats: BatchStats,
    pub aborted: bool,
}

/// 进度回调
pub type ProgressCallback<'a> = &'a (dyn Fn(&BatchProgress) + Send + Sync);

// 等待；被取消时返回 true
async fn wait_or_cancelled(duration: Duration, cancel: Option<&CancellationToken>) -> bool {
    match cancel {
        Some(token) => tokio::select! {
            _ = tokio::time::sleep(duration) => false,
            _ = token.cancelled() => true,
        },
        None => {
            tokio::time::sleep(duration).await;
            false
        }
    }
}

// ==========================================
// BatchProcessor - 批量写入器
// ==========================================
pub struct BatchProcessor {
    options: BatchOptions,
}

impl BatchProcessor {
    pub fn new(options: BatchOptions) -> Self {
        Self {
            options: BatchOptions {
                batch_size: options.batch_size.max(1),
                max_retries: options.max_retries.max(1),
                ..options
            },
        }
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    // 单项写入（带重试）
    async fn process_with_retry<T: Sync>(
        &self,
        item: &T,
        index: usize,
        sink: &dyn RecordSink<T>,
        cancel: Option<&CancellationToken>,
    ) -> Result<BatchSuccess, BatchFailure> {
        let max_retries = self.options.max_retries;
        let mut last_error = String::new();

        for attempt in 1..=max_retries {
            match sink.create(item).await {
                Ok(id) => return Ok(BatchSuccess { index, id }),
                Err(e) => {
                    last_error = e.to_string();
                    warn!(index, attempt, max_retries, error = %e, "写入失败");

                    if attempt < max_retries
                        && wait_or_cancelled(self.options.retry_delay * attempt, cancel).await
                    {
                        return Err(BatchFailure {
                            index,
                            error: last_error,
                            attempts: attempt,
                        });
                    }
                }
            }
        }

        Err(BatchFailure {
            index,
            error: last_error,
            attempts: max_retries,
        })
    }

    /// 分批写入全部记录
    ///
    /// # 参数
    /// - items: 待写入记录
    /// - sink: 持久化协作方
    /// - on_progress: 每批完成后回调
    /// - cancel: 取消令牌（已开始的批次会执行完）
    pub async fn process<T: Sync>(
        &self,
        items: &[T],
        sink: &dyn RecordSink<T>,
        on_progress: Option<ProgressCallback<'_>>,
        cancel: Option<&CancellationToken>,
    ) -> BatchOutcome {
        let start_time = Instant::now();
        let batch_size = self.options.batch_size;
        let total_batches = items.len().div_ceil(batch_size);

        info!(total = items.len(), batch_size, total_batches, "开始批量写入");

        let mut succeeded = Vec::new();
        let mut failed = Vec::new();

        for (batch_index, batch) in items.chunks(batch_size).enumerate() {
            if cancel.map(|t| t.is_cancelled()).unwrap_or(false) {
                info!(batch = batch_index + 1, "批量写入已取消");
                break;
            }

            let start = batch_index * batch_size;
            debug!(
                batch = batch_index + 1,
                total_batches,
                size = batch.len(),
                "处理批次"
            );

            let results = join_all(
                batch
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.process_with_retry(item, start + i, sink, cancel)),
            )
            .await;

            for result in results {
                match result {
                    Ok(success) => succeeded.push(success),
                    Err(failure) => failed.push(failure),
                }
            }

            // 进度
            let processed = start + batch.len();
            let elapsed_ms = start_time.elapsed().as_millis() as u64;
            let avg_ms = elapsed_ms as f64 / processed as f64;
            let remaining = items.len() - processed;
            if let Some(callback) = on_progress {
                callback(&BatchProgress {
                    total: items.len(),
                    processed,
                    succeeded: succeeded.len(),
                    failed: failed.len(),
                    percentage: ((processed as f64 / items.len() as f64) * 100.0).round() as u32,
                    current_batch: batch_index + 1,
                    total_batches,
                    estimated_time_remaining_ms: (avg_ms * remaining as f64).round() as u64,
                    elapsed_ms,
                });
            }

            // 批间等待
            if batch_index + 1 < total_batches
                && !self.options.batch_delay.is_zero()
                && wait_or_cancelled(self.options.batch_delay, cancel).await
            {
                info!(batch = batch_index + 1, "批间等待时取消");
                break;
            }
        }

        let duration_ms = start_time.elapsed().as_millis() as u64;
        let aborted = cancel.map(|t| t.is_cancelled()).unwrap_or(false);
        let stats = BatchStats {
            total: items.len(),
            succeeded: succeeded.len(),
            failed: failed.len(),
            duration_ms,
            average_ms_per_item: if items.is_empty() {
                0.0
            } else {
                duration_ms as f64 / items.len() as f64
            },
        };

        info!(
            succeeded = stats.succeeded,
            failed = stats.failed,
            duration_ms,
            aborted,
            "批量写入完成"
        );

        BatchOutcome {
            succeeded,
            failed,
            stats,
            aborted,
        }
    }
}
