//! word/charts/chartN.xml
//!
//! One chart part per registered chart node. Bar and column charts share
//! the `c:barChart` element and differ only in bar direction; scatter
//! charts plot values against a numeric axis instead of categories.

use crate::error::DocxResult;
use crate::escape_xml;
use crate::namespaces;
use crate::XML_DECLARATION;
use doc_model::{ChartSeries, ChartType, Document, NodeHandle, Payload};

pub struct ChartWriter;

impl ChartWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write(&self, doc: &Document, handle: NodeHandle) -> DocxResult<String> {
        let node = doc.node(handle)?;
        let Payload::Chart {
            chart_type,
            categories,
            series,
            ..
        } = &node.payload
        else {
            return Ok(String::new());
        };

        let mut xml = String::with_capacity(4 * 1024);
        xml.push_str(XML_DECLARATION);
        xml.push_str(&format!(
            r#"<c:chartSpace xmlns:c="{}" xmlns:a="{}" xmlns:r="{}">"#,
            namespaces::C,
            namespaces::A,
            namespaces::R
        ));
        xml.push_str("<c:chart><c:plotArea><c:layout/>");

        let element = chart_type.ooxml_element();
        xml.push_str(&format!("<c:{}>", element));
        match chart_type {
            ChartType::Bar => xml.push_str(r#"<c:barDir val="bar"/>"#),
            ChartType::Column => xml.push_str(r#"<c:barDir val="col"/>"#),
            ChartType::Radar => xml.push_str(r#"<c:radarStyle val="standard"/>"#),
            ChartType::Scatter => xml.push_str(r#"<c:scatterStyle val="lineMarker"/>"#),
            _ => {}
        }
        for (series_index, one) in series.iter().enumerate() {
            self.write_series(&mut xml, series_index, one, categories, *chart_type);
        }
        let needs_axes = !matches!(chart_type, ChartType::Pie | ChartType::Doughnut);
        if needs_axes {
            xml.push_str(r#"<c:axId val="1"/><c:axId val="2"/>"#);
        }
        xml.push_str(&format!("</c:{}>", element));

        if needs_axes {
            let category_axis = if matches!(chart_type, ChartType::Scatter) {
                "valAx"
            } else {
                "catAx"
            };
            xml.push_str(&format!(
                concat!(
                    r#"<c:{ax}><c:axId val="1"/><c:scaling><c:orientation val="minMax"/></c:scaling>"#,
                    r#"<c:delete val="0"/><c:axPos val="b"/><c:crossAx val="2"/></c:{ax}>"#
                ),
                ax = category_axis
            ));
            xml.push_str(concat!(
                r#"<c:valAx><c:axId val="2"/><c:scaling><c:orientation val="minMax"/></c:scaling>"#,
                r#"<c:delete val="0"/><c:axPos val="l"/><c:crossAx val="1"/></c:valAx>"#
            ));
        }

        xml.push_str("</c:plotArea><c:plotVisOnly val=\"1\"/></c:chart></c:chartSpace>");
        Ok(xml)
    }

    fn write_series(
        &self,
        xml: &mut String,
        index: usize,
        series: &ChartSeries,
        categories: &[String],
        chart_type: ChartType,
    ) {
        xml.push_str("<c:ser>");
        xml.push_str(&format!(
            r#"<c:idx val="{i}"/><c:order val="{i}"/>"#,
            i = index
        ));
        if !series.name.is_empty() {
            xml.push_str(&format!(
                "<c:tx><c:strRef><c:strCache><c:ptCount val=\"1\"/><c:pt idx=\"0\"><c:v>{}</c:v></c:pt></c:strCache></c:strRef></c:tx>",
                escape_xml(&series.name)
            ));
        }
        let categories_tag = if matches!(chart_type, ChartType::Scatter) {
            "c:xVal"
        } else {
            "c:cat"
        };
        let values_tag = if matches!(chart_type, ChartType::Scatter) {
            "c:yVal"
        } else {
            "c:val"
        };
        xml.push_str(&format!("<{}><c:strLit>", categories_tag));
        xml.push_str(&format!(r#"<c:ptCount val="{}"/>"#, categories.len()));
        for (idx, category) in categories.iter().enumerate() {
            xml.push_str(&format!(
                r#"<c:pt idx="{}"><c:v>{}</c:v></c:pt>"#,
                idx,
                escape_xml(category)
            ));
        }
        xml.push_str(&format!("</c:strLit></{}>", categories_tag));
        xml.push_str(&format!("<{}><c:numLit>", values_tag));
        xml.push_str(&format!(r#"<c:ptCount val="{}"/>"#, series.values.len()));
        for (idx, value) in series.values.iter().enumerate() {
            xml.push_str(&format!(
                r#"<c:pt idx="{}"><c:v>{}</c:v></c:pt>"#,
                idx, value
            ));
        }
        xml.push_str(&format!("</c:numLit></{}>", values_tag));
        xml.push_str("</c:ser>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_model::SectionStyle;

    fn chart_doc(chart_type: ChartType) -> (Document, NodeHandle) {
        let mut doc = Document::new();
        let section = doc.add_section(SectionStyle::a4());
        let chart = doc
            .add_chart(
                section,
                chart_type,
                vec!["Q1".to_string(), "Q2".to_string()],
                vec![ChartSeries {
                    name: "Revenue".to_string(),
                    values: vec![10.0, 20.5],
                }],
            )
            .unwrap();
        (doc, chart)
    }

    #[test]
    fn test_column_chart_structure() {
        let (doc, chart) = chart_doc(ChartType::Column);
        let xml = ChartWriter::new().write(&doc, chart).unwrap();
        assert!(xml.contains("<c:barChart>"));
        assert!(xml.contains(r#"<c:barDir val="col"/>"#));
        assert!(xml.contains("<c:v>Q1</c:v>"));
        assert!(xml.contains("<c:v>20.5</c:v>"));
        assert!(xml.contains("<c:catAx>"));
    }

    #[test]
    fn test_pie_chart_has_no_axes() {
        let (doc, chart) = chart_doc(ChartType::Pie);
        let xml = ChartWriter::new().write(&doc, chart).unwrap();
        assert!(xml.contains("<c:pieChart>"));
        assert!(!xml.contains("<c:catAx>"));
        assert!(!xml.contains("<c:axId"));
    }

    #[test]
    fn test_scatter_chart_uses_xy_values() {
        let (doc, chart) = chart_doc(ChartType::Scatter);
        let xml = ChartWriter::new().write(&doc, chart).unwrap();
        assert!(xml.contains("<c:xVal>"));
        assert!(xml.contains("<c:yVal>"));
        assert!(!xml.contains("<c:cat>"));
    }

    #[test]
    fn test_series_name_cached() {
        let (doc, chart) = chart_doc(ChartType::Bar);
        let xml = ChartWriter::new().write(&doc, chart).unwrap();
        assert!(xml.contains("<c:v>Revenue</c:v>"));
        assert!(xml.contains(r#"<c:idx val="0"/>"#));
    }
}
