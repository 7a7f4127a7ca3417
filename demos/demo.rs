use ipnum::{
    Cidr, HeaderMap, IpDiscovery, host_num, in_net_num, ip_version, ipv6, match_net_num, net_num,
    net_num_cidr, parse_cidr,
};
use std::collections::HashMap;

fn main() -> ipnum::Result<()> {
    println!("=== IP Number Examples ===\n");

    // Example 1: IPv4 network and host numbers
    example_1_ipv4_numbers()?;

    // Example 2: IPv6 text forms
    example_2_ipv6_forms()?;

    // Example 3: IPv6 arithmetic
    example_3_ipv6_numbers()?;

    // Example 4: CIDR parsing and the lenient wrappers
    example_4_cidr()?;

    // Example 5: Network matching and membership
    example_5_matching();

    // Example 6: Client address discovery
    example_6_discovery();

    println!("=== All examples completed! ===");
    Ok(())
}

fn example_1_ipv4_numbers() -> ipnum::Result<()> {
    println!("Example 1: IPv4 network and host numbers");

    let ip = "192.168.1.130";
    println!("Address:         {} ({})", ip, ip_version(ip));
    println!("Network (/24):   {}", net_num(ip, 24, false)?);
    println!("Host (/24):      {}", host_num(ip, 24, false)?);
    println!("Network binary:  {}", net_num(ip, 24, true)?);
    println!("Host binary:     {}", host_num(ip, 24, true)?);

    match net_num(ip, 33, false) {
        Ok(net) => println!("Unexpected: {}", net),
        Err(e) => println!("Mask 33 rejected: {}", e),
    }
    println!();
    Ok(())
}

fn example_2_ipv6_forms() -> ipnum::Result<()> {
    println!("Example 2: IPv6 text forms");

    let ip = "2001:db8::ff00:42:8329";
    println!("Literal:         {}", ip);
    println!("Full:            {}", ipv6::to_full(ip)?);
    println!("Abbreviation:    {}", ipv6::to_abbreviation(ip)?);
    println!("Hex string:      {}", ipv6::to_hex_string(ip)?);
    println!("Dotted decimal:  {}", ipv6::to_dotted_decimal(ip)?);
    println!();
    Ok(())
}

fn example_3_ipv6_numbers() -> ipnum::Result<()> {
    println!("Example 3: IPv6 arithmetic");

    let ip = "2001:db8:abcd:1234::1";
    for mask in [20, 48, 64, 100] {
        println!("/{:<3} network: {}", mask, net_num(ip, mask, false)?);
        println!("/{:<3} host:    {}", mask, host_num(ip, mask, false)?);
    }
    println!();
    Ok(())
}

fn example_4_cidr() -> ipnum::Result<()> {
    println!("Example 4: CIDR parsing");

    for text in ["10.20.30.40/16", "not-a-cidr"] {
        match parse_cidr(text) {
            Some(cidr) => println!("{:<16} -> address {}, prefix {}", text, cidr.address, cidr.prefix_len),
            None => println!("{:<16} -> unparsable", text),
        }
        match net_num_cidr(text, false)? {
            Some(net) => println!("{:<16} -> network {}", text, net),
            None => println!("{:<16} -> no network number", text),
        }
    }
    println!();
    Ok(())
}

fn example_5_matching() {
    println!("Example 5: Network matching and membership");

    println!(
        "192.168.1.1/24 ~ 192.168.1.254/24:                 {}",
        match_net_num(["192.168.1.1/24", "192.168.1.254/24"])
    );
    println!(
        "192.168.1.1/24 ~ 192.168.1.254/24 ~ 192.168.2.1/24: {}",
        match_net_num(["192.168.1.1/24", "192.168.1.254/24", "192.168.2.1/24"])
    );

    let template = Cidr::new("10.0.0.0", 8);
    println!("10.1.2.3/32 in 10.0.0.0/8:  {}", in_net_num(&template, ["10.1.2.3/32"]));
    println!("10.1.2.3/8 in 10.0.0.0/24:  {}", in_net_num("10.0.0.0/24", ["10.1.2.3/8"]));
    println!();
}

fn example_6_discovery() {
    println!("Example 6: Client address discovery");

    let mut vars = HashMap::new();
    vars.insert("HTTP_CLIENT_IP".to_string(), "unknown".to_string());
    vars.insert(
        "HTTP_X_FORWARDED_FOR".to_string(),
        "203.0.113.1, 192.168.1.10".to_string(),
    );
    vars.insert("REMOTE_ADDR".to_string(), "192.168.1.10".to_string());
    vars.insert("SERVER_ADDR".to_string(), "192.0.2.1".to_string());

    let discovery = IpDiscovery::new();
    println!("Client (first forwarded): {}", discovery.client_ip(&vars));
    println!(
        "Client (last forwarded):  {}",
        IpDiscovery::new().use_first_forwarded(false).client_ip(&vars)
    );
    println!("Server:                   {:?}", discovery.server_ip(&vars));
    println!("Nothing set:              {}", discovery.client_ip(&HeaderMap::new()));
    println!();
}
