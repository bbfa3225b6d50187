#[cfg(test)]
mod tests {
    use super::super::analyzer::MomentumAnalyzer;
    use super::super::indicators::*;
    use chrono::{Duration, TimeZone, Utc};
    use forecast_core::{EngineConfig, PricePoint, Trend};

    // Helper function to create sample price data
    fn sample_prices() -> Vec<f64> {
        vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64,
        ]
    }

    fn series_from(closes: &[f64]) -> Vec<PricePoint> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                timestamp: base + Duration::days(i as i64),
                close,
            })
            .collect()
    }

    /// Rising closes with a small wobble so both gains and losses appear
    fn mixed_series(len: usize) -> Vec<PricePoint> {
        let closes: Vec<f64> = (0..len)
            .map(|i| 100.0 + i as f64 * 0.3 + if i % 2 == 0 { 0.5 } else { -0.5 })
            .collect();
        series_from(&closes)
    }

    #[test]
    fn test_sma_basic() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma(&data, 3);

        assert_eq!(result.len(), 3);
        assert!((result[0] - 2.0).abs() < 0.001); // (1+2+3)/3 = 2
        assert!((result[1] - 3.0).abs() < 0.001); // (2+3+4)/3 = 3
        assert!((result[2] - 4.0).abs() < 0.001); // (3+4+5)/3 = 4
    }

    #[test]
    fn test_sma_insufficient_data() {
        let data = vec![1.0, 2.0];
        let result = sma(&data, 5);

        assert_eq!(result.len(), 0);
    }

    #[test]
    fn test_rsi_bounds() {
        let prices = sample_prices();
        let result = rsi(&prices, 14);

        assert!(!result.is_empty());
        for &value in &result {
            assert!(value >= 0.0 && value <= 100.0);
        }
    }

    #[test]
    fn test_rsi_insufficient_data() {
        // Needs period + 1 points for the first delta window
        let data = vec![1.0; 14];
        assert_eq!(rsi(&data, 14).len(), 0);

        let data = vec![1.0; 15];
        assert_eq!(rsi(&data, 14).len(), 1);
    }

    #[test]
    fn test_rsi_all_gains_reads_100() {
        let uptrend: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let result = rsi(&uptrend, 14);

        // No losses in the window: RS is undefined, reported as max
        assert_eq!(*result.last().unwrap(), 100.0);
    }

    #[test]
    fn test_rsi_all_losses_reads_0() {
        let downtrend: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let result = rsi(&downtrend, 14);

        assert_eq!(*result.last().unwrap(), 0.0);
    }

    #[test]
    fn test_analyzer_insufficient_history() {
        let analyzer = MomentumAnalyzer::new();
        assert!(analyzer.analyze(&mixed_series(49)).is_none());
        assert!(analyzer.analyze(&[]).is_none());
    }

    #[test]
    fn test_analyzer_short_history_omits_long_ma() {
        let analyzer = MomentumAnalyzer::new();
        let snapshot = analyzer.analyze(&mixed_series(60)).unwrap();

        assert!(snapshot.sma_200.is_none());
        assert!(snapshot.rsi_14 >= 0.0 && snapshot.rsi_14 <= 100.0);
        assert!(snapshot.sma_50 > 0.0);
    }

    #[test]
    fn test_analyzer_long_history_includes_long_ma() {
        let analyzer = MomentumAnalyzer::new();
        let snapshot = analyzer.analyze(&mixed_series(250)).unwrap();

        let sma_200 = snapshot.sma_200.unwrap();
        // Rising series: recent 50-day mean sits above the 200-day mean
        assert!(snapshot.sma_50 > sma_200);
        let last_close = mixed_series(250).last().unwrap().close;
        assert!((snapshot.current_price - last_close).abs() < 0.01);
    }

    #[test]
    fn test_trend_overbought_on_rising_series() {
        let analyzer = MomentumAnalyzer::new();
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let snapshot = analyzer.analyze(&series_from(&closes)).unwrap();

        assert_eq!(snapshot.rsi_14, 100.0);
        assert_eq!(snapshot.trend, Trend::Overbought);
    }

    #[test]
    fn test_trend_oversold_on_falling_series() {
        let analyzer = MomentumAnalyzer::new();
        let closes: Vec<f64> = (0..60).map(|i| 200.0 - i as f64).collect();
        let snapshot = analyzer.analyze(&series_from(&closes)).unwrap();

        assert_eq!(snapshot.rsi_14, 0.0);
        assert_eq!(snapshot.trend, Trend::Oversold);
    }

    #[test]
    fn test_trend_exactly_at_threshold_is_neutral() {
        // Thresholds are strict: an RSI equal to the overbought bound does
        // not classify as Overbought
        let config = EngineConfig {
            rsi_overbought: 100.0,
            ..EngineConfig::default()
        };
        let analyzer = MomentumAnalyzer::with_config(config);
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let snapshot = analyzer.analyze(&series_from(&closes)).unwrap();

        assert_eq!(snapshot.rsi_14, 100.0);
        assert_eq!(snapshot.trend, Trend::Neutral);
    }

    #[test]
    fn test_analyzer_custom_periods() {
        let config = EngineConfig {
            ma_short_period: 10,
            ma_long_period: 20,
            ..EngineConfig::default()
        };
        let analyzer = MomentumAnalyzer::with_config(config);
        let snapshot = analyzer.analyze(&mixed_series(25)).unwrap();

        assert!(snapshot.sma_200.is_some());
    }
}
