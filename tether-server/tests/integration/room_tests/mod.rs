mod test_two_peers_scenario;
