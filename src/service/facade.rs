// ==========================================
// 紫微斗数排盘引擎 - 排盘服务门面
// ==========================================
// 职责: 参数推导 + 命盘组装 + 缓存, 对外唯一入口
// 输入: BirthInput / LunarDate + 性别
// 输出: Arc<CompleteChart> (只读共享)
// ==========================================
// 红线: 不持有全局单例, 由调用方构造并持有
// 红线: 计算失败直接上抛, 不返回半成品命盘
// ==========================================

use super::cache::{CacheStats, ChartCache, NoCache, TtlLruCache};
use super::fingerprint::ChartFingerprint;
use crate::calendar::CalendarProvider;
use crate::config::EngineConfig;
use crate::domain::chart::{BirthInput, CompleteChart, LunarDate};
use crate::domain::types::Gender;
use crate::engine::{ChartAssembler, ChartContext, ChartOptions, ParameterDeriver};
use crate::error::ZiweiResult;
use crate::perf::{self, PerfGuard};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// 直接按农历日期排盘时写入元数据的历法来源
pub const DIRECT_CALENDAR_SOURCE: &str = "direct";

// ==========================================
// ChartService - 排盘服务
// ==========================================
pub struct ChartService {
    config: EngineConfig,
    options: ChartOptions,
    deriver: ParameterDeriver,
    assembler: ChartAssembler,
    cache: Arc<dyn ChartCache>,
}

impl ChartService {
    /// 创建排盘服务
    ///
    /// # 参数
    /// - config: 引擎配置 (先校验)
    /// - calendar: 历法协作方
    pub fn new(config: EngineConfig, calendar: Arc<dyn CalendarProvider>) -> ZiweiResult<Self> {
        config.validate()?;

        let cache: Arc<dyn ChartCache> = if config.cache_enabled {
            Arc::new(TtlLruCache::new(
                Duration::from_secs(config.cache_ttl_secs),
                config.cache_max_entries,
            )?)
        } else {
            Arc::new(NoCache::new())
        };

        info!(
            engine = crate::ENGINE_NAME,
            calendar = calendar.name(),
            cache_enabled = config.cache_enabled,
            "排盘服务已创建"
        );

        Ok(Self {
            options: ChartOptions::from_config(&config),
            deriver: ParameterDeriver::new(calendar),
            assembler: ChartAssembler::new(),
            cache,
            config,
        })
    }

    /// 替换缓存实现
    pub fn with_cache(mut self, cache: Arc<dyn ChartCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 由配置推出的默认排盘选项
    pub fn default_options(&self) -> ChartOptions {
        self.options
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 按默认选项排盘
    pub fn compute(&self, input: &BirthInput) -> ZiweiResult<Arc<CompleteChart>> {
        self.compute_with(input, &self.options)
    }

    /// 按指定选项排盘
    #[instrument(skip(self, input, options), fields(year = input.year, month = input.month, day = input.day))]
    pub fn compute_with(
        &self,
        input: &BirthInput,
        options: &ChartOptions,
    ) -> ZiweiResult<Arc<CompleteChart>> {
        let _perf = PerfGuard::new("compute_chart");
        input.validate()?;
        options.validate()?;

        let fingerprint = ChartFingerprint::from_input(input, options);
        self.cache.get_or_compute(&fingerprint, &|| {
            let lunar = self.deriver.derive(input)?;
            perf::record_chart_computed();
            self.assembler.compose(
                &lunar,
                input.gender,
                options,
                ChartContext {
                    fingerprint: fingerprint.as_key(),
                    calendar_source: self.deriver.calendar_name().to_string(),
                },
            )
        })
    }

    /// 直接按农历日期排盘 (不经历法换算)
    #[instrument(skip(self, lunar, options), fields(year = lunar.year, month = lunar.month, day = lunar.day))]
    pub fn compute_lunar(
        &self,
        lunar: &LunarDate,
        gender: Gender,
        options: &ChartOptions,
    ) -> ZiweiResult<Arc<CompleteChart>> {
        let _perf = PerfGuard::new("compute_chart_lunar");
        lunar.validate()?;
        options.validate()?;

        let fingerprint = ChartFingerprint::from_lunar(lunar, gender, options);
        self.cache.get_or_compute(&fingerprint, &|| {
            perf::record_chart_computed();
            self.assembler.compose(
                lunar,
                gender,
                options,
                ChartContext {
                    fingerprint: fingerprint.as_key(),
                    calendar_source: DIRECT_CALENDAR_SOURCE.to_string(),
                },
            )
        })
    }

    /// 批量排盘
    ///
    /// 按可用并行度切块, 每块一个作用域线程; 结果顺序与输入一致
    pub fn compute_batch(&self, inputs: &[BirthInput]) -> Vec<ZiweiResult<Arc<CompleteChart>>> {
        let _perf = PerfGuard::new("compute_chart_batch");
        if inputs.is_empty() {
            return Vec::new();
        }

        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(inputs.len());
        let chunk_size = inputs.len().div_ceil(workers);

        let results: Vec<ZiweiResult<Arc<CompleteChart>>> = std::thread::scope(|s| {
            let handles: Vec<_> = inputs
                .chunks(chunk_size)
                .map(|chunk| {
                    s.spawn(move || chunk.iter().map(|input| self.compute(input)).collect::<Vec<_>>())
                })
                .collect();

            handles
                .into_iter()
                .zip(inputs.chunks(chunk_size))
                .flat_map(|(handle, chunk)| match handle.join() {
                    Ok(results) => results,
                    // 工作线程 panic 时, 该块在当前线程重算
                    Err(_) => chunk.iter().map(|input| self.compute(input)).collect(),
                })
                .collect()
        });

        info!(count = results.len(), workers, "批量排盘完成");
        results
    }

    // ==========================================
    // 缓存管理
    // ==========================================

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
