use crate::collect::ip_interface::IpInterface;
use crate::collect::snapshot::{PeerRows, Snapshot};
use crate::ext::fallback_ext::{OrNotAvailableExt, NOT_AVAILABLE};
use crate::notify::{Level, Notification};
use crate::render::byte_units::format_bytes;
use crate::render::node::{Element, Node};

const PEER_COLUMNS: [&str; 7] = [
    "IP",
    "Hostname",
    "Status",
    "Relay",
    "Connection",
    "Rx Bytes",
    "Tx Bytes",
];
const PEER_CELL_STYLE: &str = "padding-left: 10px";
const LABEL_WIDTH: &str = "25%";

/// Display values of one interface, derived from the raw `ip` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceRecord {
    pub name: String,
    pub ipv4: Option<String>,
    pub ipv6: Option<String>,
    pub mtu: Option<u32>,
    /// Empty when the interface reported no counters.
    pub rx_bytes: String,
    pub tx_bytes: String,
}

impl From<&IpInterface> for InterfaceRecord {
    fn from(iface: &IpInterface) -> Self {
        InterfaceRecord {
            name: iface.ifname.clone(),
            ipv4: iface.first_address("inet").map(str::to_string),
            ipv6: iface.first_address("inet6").map(str::to_string),
            mtu: iface.mtu,
            rx_bytes: iface.rx_bytes().map(format_bytes).unwrap_or_default(),
            tx_bytes: iface.tx_bytes().map(format_bytes).unwrap_or_default(),
        }
    }
}

impl InterfaceRecord {
    fn fields(&self) -> [(&'static str, String); 6] {
        let mtu = self
            .mtu
            .filter(|mtu| *mtu > 0)
            .map(|mtu| mtu.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        [
            ("Interface Name", self.name.clone()),
            ("IPv4 Address", self.ipv4.as_deref().or_na()),
            ("IPv6 Address", self.ipv6.as_deref().or_na()),
            ("MTU", mtu),
            ("Total Download", self.rx_bytes.as_str().or_na()),
            ("Total Upload", self.tx_bytes.as_str().or_na()),
        ]
    }
}

fn label_row(label: &str, value: String) -> Element {
    Element::new("tr").class("tr").children([
        Element::new("td")
            .class("td left")
            .attr("width", LABEL_WIDTH)
            .text(label),
        Element::new("td")
            .class("td left")
            .attr("width", LABEL_WIDTH)
            .text(value),
    ])
}

fn wide_row(cell: &'static str, colspan: usize, content: impl Into<Node>) -> Element {
    Element::new("tr").class("tr").child(
        Element::new(cell)
            .class(if cell == "th" { "th left" } else { "td left" })
            .attr("style", PEER_CELL_STYLE)
            .attr("colspan", colspan.to_string())
            .child(content),
    )
}

fn render_interfaces(interfaces: &[IpInterface]) -> Element {
    let table = Element::new("table").class("table");
    if interfaces.is_empty() {
        return table.child(wide_row("td", 2, Node::Text("No interface online.".to_string())));
    }

    let rows = interfaces.iter().flat_map(|iface| {
        InterfaceRecord::from(iface)
            .fields()
            .into_iter()
            .map(|(label, value)| label_row(label, value))
    });

    table
        .child(wide_row(
            "th",
            2,
            Node::Text("Network Interface Information".to_string()),
        ))
        .children(rows)
}

fn render_peer_rows(rows: &PeerRows) -> Vec<Element> {
    match rows {
        PeerRows::Peers(peers) => peers
            .iter()
            .map(|peer| {
                Element::new("tr").class("tr").children(peer.cells().map(|cell| {
                    Element::new("td")
                        .class("td left")
                        .attr("style", PEER_CELL_STYLE)
                        .text(cell)
                }))
            })
            .collect(),
        PeerRows::Placeholder(placeholder) => vec![wide_row(
            "td",
            PEER_COLUMNS.len(),
            Node::Text(placeholder.label().to_string()),
        )],
    }
}

fn render_peers(rows: &PeerRows) -> Element {
    let header = Element::new("tr").class("tr").children(PEER_COLUMNS.map(|column| {
        Element::new("th")
            .class("th left")
            .attr("style", PEER_CELL_STYLE)
            .text(column)
    }));

    Element::new("table")
        .class("table")
        .attr("style", "border-collapse: collapse; width: 100%;")
        .child(wide_row("th", PEER_COLUMNS.len(), Node::Text("Peer Status".to_string())))
        .child(wide_row(
            "td",
            PEER_COLUMNS.len(),
            Element::new("div")
                .class("cbi-map-descr")
                .text("Current status of Tailscale nodes and connections."),
        ))
        .child(header)
        .children(render_peer_rows(rows))
}

/// The interface table followed by the peer table.
pub fn render(snapshot: &Snapshot) -> Node {
    Element::new("div")
        .child(render_interfaces(&snapshot.interfaces))
        .child(
            Element::new("div")
                .attr("style", "margin-top: 20px")
                .child(Element::new("div").attr("style", "margin-bottom: 20px"))
                .child(render_peers(&snapshot.status_rows)),
        )
        .into()
}

fn render_banner(notification: &Notification) -> Element {
    let level = match notification.level {
        Level::Warning => "warning",
        Level::Error => "error",
    };
    Element::new("div")
        .class(&format!("alert-message {level}"))
        .child(Element::new("p").text(notification.message.as_str()))
}

/// Full panel: heading, description, the tick's banners, then the content.
pub fn render_page(snapshot: &Snapshot, banners: &[Notification]) -> Node {
    Element::new("div")
        .children(banners.iter().map(render_banner))
        .child(Element::new("h2").class("content").text("Tailscale"))
        .child(
            Element::new("div")
                .class("cbi-map-descr")
                .text("Tailscale is a cross-platform and easy to use virtual LAN."),
        )
        .child(render(snapshot))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::ip_interface::parse_interfaces;
    use crate::collect::peer::parse_peers;
    use crate::collect::snapshot::Placeholder;

    fn interfaces() -> Vec<IpInterface> {
        parse_interfaces(
            r#"[{"ifname":"tailscale0","mtu":1280,
                "addr_info":[
                    {"family":"inet6","local":"fd7a::1"},
                    {"family":"inet","local":"100.64.0.1"},
                    {"family":"inet","local":"100.64.0.9"}],
                "stats64":{"rx":{"bytes":2097152},"tx":{"bytes":512}}}]"#,
        )
        .unwrap()
    }

    fn row_texts(node: &Node) -> Vec<String> {
        node.find_all("tr")
            .into_iter()
            .map(|row| Node::Element(row.clone()).text_content())
            .collect()
    }

    #[test]
    fn test_interface_record() {
        let record = InterfaceRecord::from(&interfaces()[0]);
        assert_eq!(
            record,
            InterfaceRecord {
                name: "tailscale0".to_string(),
                ipv4: Some("100.64.0.1".to_string()),
                ipv6: Some("fd7a::1".to_string()),
                mtu: Some(1280),
                rx_bytes: "2.00 MB".to_string(),
                tx_bytes: "512 B".to_string(),
            }
        );
    }

    #[test]
    fn test_interface_fallbacks() {
        let iface = IpInterface {
            ifname: "tailscale1".to_string(),
            mtu: Some(0),
            ..Default::default()
        };
        let values: Vec<_> = InterfaceRecord::from(&iface)
            .fields()
            .into_iter()
            .map(|(_, value)| value)
            .collect();
        assert_eq!(values, ["tailscale1", "N/A", "N/A", "N/A", "N/A", "N/A"]);
    }

    #[test]
    fn test_render_without_interfaces() {
        let snapshot = Snapshot::new(Vec::new(), PeerRows::Placeholder(Placeholder::NoPeers));
        let tree = render(&snapshot);
        let rows = row_texts(&tree);

        assert_eq!(rows[0], "No interface online.");
        assert_eq!(rows[1], "Peer Status");
        assert_eq!(rows[3], PEER_COLUMNS.concat());
        assert_eq!(rows.last().map(String::as_str), Some("No peers found"));
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn test_render_interface_block() {
        let snapshot = Snapshot::new(interfaces(), PeerRows::Placeholder(Placeholder::NoPeers));
        let rows = row_texts(&render(&snapshot));

        assert_eq!(
            &rows[..7],
            [
                "Network Interface Information",
                "Interface Nametailscale0",
                "IPv4 Address100.64.0.1",
                "IPv6 Addressfd7a::1",
                "MTU1280",
                "Total Download2.00 MB",
                "Total Upload512 B",
            ]
        );
    }

    #[test]
    fn test_render_peer_rows() {
        let peers = parse_peers(
            r#"{"Peer":{"a":{"TailscaleIPs":["100.0.0.1"],"HostName":"h1","Online":true,"CurAddr":"1.2.3.4:1","RxBytes":2097152,"TxBytes":0}}}"#,
        )
        .unwrap();
        let snapshot = Snapshot::new(interfaces(), PeerRows::from_peers(peers));
        let tree = render(&snapshot);

        let cells: Vec<_> = tree
            .find_all("td")
            .into_iter()
            .rev()
            .take(7)
            .map(|cell| Node::Element(cell.clone()).text_content())
            .collect();
        assert_eq!(
            cells,
            ["0 MB", "2.00 MB", "direct", "N/A", "online", "h1", "100.0.0.1"]
        );
        assert_eq!(tree.find_all("th").len(), 2 + PEER_COLUMNS.len());
    }

    #[test]
    fn test_render_placeholder_spans_table() {
        let snapshot = Snapshot::new(
            interfaces(),
            PeerRows::Placeholder(Placeholder::ErrorRetrieving),
        );
        let html = render(&snapshot).to_html();
        assert!(html.contains(
            r#"<td class="td left" style="padding-left: 10px" colspan="7">Error retrieving status</td>"#
        ));
    }

    #[test]
    fn test_render_page_banners() {
        let snapshot = Snapshot::new(Vec::new(), PeerRows::Placeholder(Placeholder::NoPeers));
        let banners = [
            Notification::error("Unable to get interface info: <missing>."),
            Notification::warning("second"),
        ];
        let page = render_page(&snapshot, &banners);
        let html = page.to_html();

        assert_eq!(page.find_all("p").len(), 2);
        assert!(html.contains(
            r#"<div class="alert-message error"><p>Unable to get interface info: &lt;missing&gt;.</p></div>"#
        ));
        assert!(html.contains(r#"<div class="alert-message warning"><p>second</p></div>"#));
        assert!(html.contains(r#"<h2 class="content">Tailscale</h2>"#));
    }

    #[test]
    fn test_render_is_stateless() {
        let snapshot = Snapshot::new(interfaces(), PeerRows::Placeholder(Placeholder::NoStatusOutput));
        assert_eq!(render(&snapshot), render(&snapshot));
    }
}
