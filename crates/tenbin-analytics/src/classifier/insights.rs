//! One-line comparative insights for the HTML report.

use tenbin_core::{format_number, Metric};

use crate::metrics::ComparisonMetrics;

/// One sentence per dimension: value, profitability, income, concentration.
///
/// Unlike the classifier, every dimension always yields a line; missing data
/// produces a fixed fallback sentence for that dimension.
#[must_use]
pub fn derive_insights(metrics: &ComparisonMetrics) -> Vec<String> {
    let mut insights = Vec::with_capacity(4);

    insights.push(match metrics.pair(Metric::PbrBelow1Ratio) {
        (Some(a), Some(b)) => {
            let diff = (a - b) * 100.0;
            let direction = if diff >= 0.0 { "上回" } else { "下回" };
            format!(
                "バリュー: 読売333のPBR<1比率はTOPIXを{}pt{}っています。",
                format_number(Some(diff.abs()), 1),
                direction
            )
        }
        _ => "バリュー: PBRデータが不足しているため比較できません。".to_string(),
    });

    insights.push(match metrics.pair(Metric::RoeMedian) {
        (Some(a), Some(b)) => {
            let descriptor = if a < b { "低い" } else { "高い" };
            format!(
                "収益性: 読売333のROE中央値はTOPIXより{}水準({} vs {})です。",
                descriptor,
                format_number(Some(a), 2),
                format_number(Some(b), 2)
            )
        }
        _ => "収益性: ROE中央値の比較ができません。".to_string(),
    });

    insights.push(match metrics.pair(Metric::DividendYieldMean) {
        (Some(a), Some(b)) => {
            let descriptor = if a >= b { "高い" } else { "低い" };
            format!(
                "インカム: 読売333の配当利回り平均はTOPIXより{}水準({}% vs {}%)です。",
                descriptor,
                format_number(Some(a), 2),
                format_number(Some(b), 2)
            )
        }
        _ => "インカム: 配当利回りデータが不足しています。".to_string(),
    });

    insights.push(match metrics.index_a.get(Metric::SectorHhi) {
        Some(hhi) => format!(
            "集中度: HHIは{}で、均等分散(1/333)と比べると集中リスクを把握できます。",
            format_number(Some(hhi), 3)
        ),
        None => "集中度: セクター情報が不足しています。".to_string(),
    });

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenbin_core::MetricsTable;

    #[test]
    fn test_fallback_lines() {
        let insights = derive_insights(&ComparisonMetrics::empty());
        assert_eq!(insights.len(), 4);
        assert_eq!(insights[0], "バリュー: PBRデータが不足しているため比較できません。");
        assert_eq!(insights[3], "集中度: セクター情報が不足しています。");
    }

    #[test]
    fn test_comparisons() {
        let metrics = ComparisonMetrics::new(
            MetricsTable::from_values(
                "yomiuri333",
                [
                    (Metric::PbrBelow1Ratio, Some(0.25)),
                    (Metric::RoeMedian, Some(4.3)),
                    (Metric::DividendYieldMean, Some(2.35)),
                    (Metric::SectorHhi, Some(0.5)),
                ],
            ),
            MetricsTable::from_values(
                "topix",
                [
                    (Metric::PbrBelow1Ratio, Some(0.5)),
                    (Metric::RoeMedian, Some(7.5)),
                    (Metric::DividendYieldMean, Some(1.6)),
                ],
            ),
        );
        let insights = derive_insights(&metrics);
        assert_eq!(insights[0], "バリュー: 読売333のPBR<1比率はTOPIXを25.0pt下回っています。");
        assert_eq!(insights[1], "収益性: 読売333のROE中央値はTOPIXより低い水準(4.30 vs 7.50)です。");
        assert_eq!(
            insights[2],
            "インカム: 読売333の配当利回り平均はTOPIXより高い水準(2.35% vs 1.60%)です。"
        );
        assert!(insights[3].contains("0.500"));
    }
}
