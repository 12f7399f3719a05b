use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};

impl DataFrame {
    /// ポアソン・ブートストラップによる再標本化
    ///
    /// Every row is repeated `k ~ Poisson(lambda)` times, possibly zero,
    /// keeping the original row order.
    ///
    /// # Arguments
    /// * `lambda` - 各行の期待反復回数
    /// * `seed` - 乱数シードの値（再現性のため）
    ///
    /// # Returns
    /// * `Result<Self>` - 再標本化された新しいDataFrame
    pub fn resample(&self, lambda: f64, seed: u64) -> Result<Self> {
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "resampling rate must be finite and non-negative, got {}",
                lambda
            )));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let mut rows = Vec::with_capacity(self.row_count());
        for row in 0..self.row_count() {
            let repeat = poisson(&mut rng, lambda);
            rows.extend(std::iter::repeat(row).take(repeat));
        }
        log::debug!(
            "resampled {} rows into {} (lambda={}, seed={})",
            self.row_count(),
            rows.len(),
            lambda,
            seed
        );
        self.take(&rows)
    }

    /// サンプリングして行を取得
    ///
    /// # Arguments
    /// * `n` - サンプリングする行数
    /// * `replace` - 復元抽出するかどうか
    /// * `seed` - 乱数シードの値（再現性のため）
    ///
    /// # Returns
    /// * `Result<Self>` - サンプリングされた新しいDataFrame
    pub fn sample(&self, n: usize, replace: bool, seed: Option<u64>) -> Result<Self> {
        if self.row_count() == 0 {
            return self.take(&[]);
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let rows: Vec<usize> = if replace {
            // 復元抽出
            (0..n).map(|_| rng.random_range(0..self.row_count())).collect()
        } else {
            // 非復元抽出
            let mut rows: Vec<usize> = (0..self.row_count()).collect();
            rows.shuffle(&mut rng);
            rows.truncate(n);
            rows
        };
        self.take(&rows)
    }
}

/// Knuth's multiplication method. Large rates are split into chunks so that
/// `exp(-lambda)` never underflows.
fn poisson<R: Rng>(rng: &mut R, lambda: f64) -> usize {
    const STEP: f64 = 500.0;
    let mut remaining = lambda;
    let mut count = 0;
    while remaining > 0.0 {
        let chunk = remaining.min(STEP);
        remaining -= chunk;
        let limit = (-chunk).exp();
        let mut product = rng.random::<f64>();
        while product > limit {
            count += 1;
            product *= rng.random::<f64>();
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;

    fn frame(n: i32) -> DataFrame {
        let mut df = DataFrame::new();
        df.add_column("x", Column::from_vec((0..n).collect::<Vec<i32>>()))
            .unwrap();
        df
    }

    #[test]
    fn test_poisson_mean_is_close_to_rate() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let total: usize = (0..n).map(|_| poisson(&mut rng, 2.0)).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - 2.0).abs() < 0.1, "mean was {}", mean);
    }

    #[test]
    fn test_resample_is_deterministic_and_ordered() {
        let df = frame(50);
        let a = df.resample(1.0, 42).unwrap();
        let b = df.resample(1.0, 42).unwrap();
        assert!(a.equals(&b));

        let values = a.column("x").unwrap().getter_at::<i32>().unwrap();
        let mut previous = i32::MIN;
        for row in 0..values.len() {
            let value = *values.get(row).unwrap().into_option().unwrap();
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn test_resample_rejects_negative_rate() {
        assert!(matches!(frame(3).resample(-1.0, 0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_sample_without_replacement_caps_at_row_count() {
        let df = frame(5);
        let sampled = df.sample(10, false, Some(3)).unwrap();
        assert_eq!(sampled.row_count(), 5);
        assert_eq!(df.sample(8, true, Some(3)).unwrap().row_count(), 8);
    }
}
