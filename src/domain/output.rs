//! Presentation-independent render result and its projections.

use std::fmt;

use termtree::Tree;

/// Render result mirroring the shape of a menu tree.
///
/// Every traversal (cloning, comparing, formatting, dropping and the
/// projections) uses an explicit stack, so a value nested tens of thousands
/// of levels deep is handled without recursion.
pub struct StructuredOutput {
    pub label: String,
    pub children: Vec<StructuredOutput>,
}

impl StructuredOutput {
    pub fn new(label: impl Into<String>, children: Vec<StructuredOutput>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    pub fn leaf(label: impl Into<String>) -> Self {
        Self::new(label, Vec::new())
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// All nodes in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &StructuredOutput> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    pub fn leaf_labels(&self) -> Vec<&str> {
        self.iter()
            .filter(|n| n.is_leaf())
            .map(|n| n.label.as_str())
            .collect()
    }

    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(node.children.iter().map(|c| (c, depth + 1)));
        }
        max_depth
    }

    /// Converts into a `termtree` for terminal display.
    pub fn to_tree(&self) -> Tree<String> {
        let mut stack = vec![(self, false)];
        let mut done: Vec<Tree<String>> = Vec::new();

        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                let leaves = done.split_off(done.len() - node.children.len());
                done.push(Tree::new(node.label.clone()).with_leaves(leaves));
            } else {
                stack.push((node, true));
                stack.extend(node.children.iter().rev().map(|c| (c, false)));
            }
        }

        done.pop().unwrap_or_else(|| Tree::new(String::new()))
    }

    /// Nested `<ul>`/`<li>` list.
    ///
    /// The node itself acts as the menu container: its children become the
    /// items of the outer `<ul>`, and every composite item carries its own
    /// nested `<ul>` after the label. Labels are HTML-escaped. With `indent`
    /// every tag goes on its own line, two spaces per level.
    pub fn to_html(&self, indent: bool) -> String {
        enum Step<'a> {
            Item(&'a StructuredOutput, usize),
            Close(&'static str, usize),
        }

        let mut html = String::new();
        push_markup(&mut html, "<ul>", 0, indent);
        let mut stack = vec![Step::Close("</ul>", 0)];
        stack.extend(self.children.iter().rev().map(|c| Step::Item(c, 1)));

        while let Some(step) = stack.pop() {
            match step {
                Step::Item(node, level) if node.is_leaf() => {
                    let line = format!("<li>{}</li>", escape_html(&node.label));
                    push_markup(&mut html, &line, level, indent);
                }
                Step::Item(node, level) => {
                    let line = format!("<li>{}", escape_html(&node.label));
                    push_markup(&mut html, &line, level, indent);
                    push_markup(&mut html, "<ul>", level + 1, indent);
                    stack.push(Step::Close("</li>", level));
                    stack.push(Step::Close("</ul>", level + 1));
                    stack.extend(node.children.iter().rev().map(|c| Step::Item(c, level + 2)));
                }
                Step::Close(tag, level) => push_markup(&mut html, tag, level, indent),
            }
        }

        html
    }

    /// `{"label": .., "children": [..]}` objects, the same layout
    /// `serde_json` produces for the struct.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        enum Step<'a> {
            Node(&'a StructuredOutput, usize),
            Separator(usize),
            Close(usize),
        }

        let colon = if pretty { ": " } else { ":" };
        let mut json = String::new();
        let mut stack = vec![Step::Node(self, 0)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Node(node, level) => {
                    json.push('{');
                    push_line_break(&mut json, level + 1, pretty);
                    json.push_str("\"label\"");
                    json.push_str(colon);
                    json.push_str(&serde_json::to_string(&node.label)?);
                    json.push(',');
                    push_line_break(&mut json, level + 1, pretty);
                    json.push_str("\"children\"");
                    json.push_str(colon);
                    json.push('[');
                    if node.children.is_empty() {
                        json.push(']');
                        push_line_break(&mut json, level, pretty);
                        json.push('}');
                        continue;
                    }
                    push_line_break(&mut json, level + 2, pretty);
                    stack.push(Step::Close(level));
                    for (i, child) in node.children.iter().enumerate().rev() {
                        stack.push(Step::Node(child, level + 2));
                        if i > 0 {
                            stack.push(Step::Separator(level + 2));
                        }
                    }
                }
                Step::Separator(level) => {
                    json.push(',');
                    push_line_break(&mut json, level, pretty);
                }
                Step::Close(level) => {
                    push_line_break(&mut json, level + 1, pretty);
                    json.push(']');
                    push_line_break(&mut json, level, pretty);
                    json.push('}');
                }
            }
        }

        Ok(json)
    }
}

fn push_line_break(out: &mut String, level: usize, pretty: bool) {
    if pretty {
        out.push('\n');
        out.push_str(&"  ".repeat(level));
    }
}

fn push_markup(out: &mut String, markup: &str, level: usize, indent: bool) {
    if indent {
        out.push_str(&"  ".repeat(level));
        out.push_str(markup);
        out.push('\n');
    } else {
        out.push_str(markup);
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl Clone for StructuredOutput {
    fn clone(&self) -> Self {
        let mut stack = vec![(self, false)];
        let mut done: Vec<StructuredOutput> = Vec::new();

        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                let children = done.split_off(done.len() - node.children.len());
                done.push(StructuredOutput::new(node.label.clone(), children));
            } else {
                stack.push((node, true));
                stack.extend(node.children.iter().rev().map(|c| (c, false)));
            }
        }

        done.pop().unwrap_or_else(|| StructuredOutput::leaf(String::new()))
    }
}

/// Indented outline, one label per line.
impl fmt::Debug for StructuredOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StructuredOutput {")?;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            write!(f, "\n{}{:?}", "  ".repeat(level), node.label)?;
            stack.extend(node.children.iter().rev().map(|c| (c, level + 1)));
        }
        f.write_str("\n}")
    }
}

impl PartialEq for StructuredOutput {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.label != b.label || a.children.len() != b.children.len() {
                return false;
            }
            stack.extend(a.children.iter().zip(b.children.iter()));
        }
        true
    }
}

impl Eq for StructuredOutput {}

impl Drop for StructuredOutput {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StructuredOutput {
        StructuredOutput::new(
            "menu",
            vec![
                StructuredOutput::leaf("A"),
                StructuredOutput::new(
                    "B",
                    vec![StructuredOutput::leaf("B.1"), StructuredOutput::leaf("B.2")],
                ),
            ],
        )
    }

    #[test]
    fn given_nested_output_when_html_then_nested_lists() {
        assert_eq!(
            sample().to_html(false),
            "<ul><li>A</li><li>B<ul><li>B.1</li><li>B.2</li></ul></li></ul>"
        );
    }

    #[test]
    fn given_indent_when_html_then_one_tag_per_line() {
        let expected = "\
<ul>
  <li>A</li>
  <li>B
    <ul>
      <li>B.1</li>
      <li>B.2</li>
    </ul>
  </li>
</ul>
";
        assert_eq!(sample().to_html(true), expected);
    }

    #[test]
    fn given_markup_in_label_when_html_then_escaped() {
        let out = StructuredOutput::new("m", vec![StructuredOutput::leaf("<b>&</b>")]);
        assert_eq!(out.to_html(false), "<ul><li>&lt;b&gt;&amp;&lt;/b&gt;</li></ul>");
    }

    #[test]
    fn given_output_when_tree_then_termtree_display() {
        let rendered = sample().to_tree().to_string();
        assert!(rendered.starts_with("menu\n"));
        assert!(rendered.contains("B.2"));
    }

    #[test]
    fn given_output_when_json_then_label_children_shape() {
        let json = StructuredOutput::leaf("A").to_json(false).unwrap();
        assert_eq!(json, r#"{"label":"A","children":[]}"#);
    }

    #[test]
    fn given_pretty_flag_when_json_then_serde_json_layout() {
        let expected = r#"{
  "label": "menu",
  "children": [
    {
      "label": "A",
      "children": []
    },
    {
      "label": "B",
      "children": [
        {
          "label": "B.1",
          "children": []
        },
        {
          "label": "B.2",
          "children": []
        }
      ]
    }
  ]
}"#;
        assert_eq!(sample().to_json(true).unwrap(), expected);
    }

    #[test]
    fn given_quotes_in_label_when_json_then_escaped() {
        let json = StructuredOutput::leaf("say \"hi\"\n").to_json(false).unwrap();
        assert_eq!(json, r#"{"label":"say \"hi\"\n","children":[]}"#);
    }

    #[test]
    fn given_output_when_cloned_then_equal_and_independent() {
        let original = sample();
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.children[1].children.pop();
        assert_ne!(copy, original);
        assert_eq!(original.leaf_labels(), vec!["A", "B.1", "B.2"]);
    }

    #[test]
    fn given_output_when_debug_then_indented_outline() {
        assert_eq!(
            format!("{:?}", sample()),
            "StructuredOutput {\n  \"menu\"\n    \"A\"\n    \"B\"\n      \"B.1\"\n      \"B.2\"\n}"
        );
    }

    #[test]
    fn given_different_labels_when_comparing_then_not_equal() {
        let mut other = sample();
        other.children[1].children[0].label = "X".into();
        assert_ne!(sample(), other);
        assert_eq!(sample(), sample());
    }

    #[test]
    fn given_output_when_querying_then_pre_order_views() {
        let out = sample();
        assert_eq!(out.leaf_labels(), vec!["A", "B.1", "B.2"]);
        assert_eq!(out.depth(), 3);
        let labels: Vec<_> = out.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["menu", "A", "B", "B.1", "B.2"]);
    }
}
